//! Integration tests for the assembled agent registry.

use policy_agent_core::{FailureKind, Tool, ToolArgs, ToolCall, ToolEffect, ToolError};
use policy_agent_testing::MockTool;
use policy_agent_tools::salesforce::SalesforceSettings;
use policy_agent_tools::{InMemoryToolRegistry, ToolRegistry, agent_registry};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

fn offline_registry() -> InMemoryToolRegistry {
    // Unroutable login host; any request would fail rather than leave the machine.
    let settings = SalesforceSettings::default()
        .with_login_url("http://127.0.0.1:9")
        .unwrap()
        .with_timeout(Duration::from_secs(1));
    agent_registry(Arc::new(HashMap::<String, String>::new()), settings)
}

#[test]
fn agent_registry_exposes_three_tools_in_order() {
    let registry = offline_registry();

    assert_eq!(
        registry.tool_names(),
        vec![
            "my_custom_tool",
            "get_current_time_in_timezone",
            "get_active_insurance_policies",
        ]
    );

    let effects: Vec<_> = registry.descriptors().iter().map(|d| d.effect()).collect();
    assert_eq!(
        effects,
        vec![ToolEffect::ReadOnly, ToolEffect::ReadOnly, ToolEffect::External]
    );
}

#[test]
fn descriptors_publish_json_schemas() {
    let registry = offline_registry();
    let clock = registry.get_tool("get_current_time_in_timezone").unwrap();

    let schema = clock.descriptor().json_schema();
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["required"], serde_json::json!(["timezone"]));
    assert_eq!(schema["properties"]["timezone"]["type"], "string");
    assert_eq!(schema["additionalProperties"], false);
}

#[test]
fn salesforce_tool_without_credentials_answers_with_error() {
    let registry = offline_registry();
    let call = ToolCall::new("get_active_insurance_policies", ToolArgs::new()).unwrap();

    let answer = registry.dispatch(&call).unwrap();
    assert_eq!(
        answer,
        "Error fetching active insurance policies: missing credential 'SALESFORCE_USERNAME'"
    );
}

#[test]
fn salesforce_tool_rejects_unexpected_arguments() {
    let registry = offline_registry();
    let call = ToolCall::new(
        "get_active_insurance_policies",
        ToolArgs::new().with("status", "Active"),
    )
    .unwrap();

    assert_eq!(
        registry.dispatch(&call).unwrap(),
        "Error invoking tool 'get_active_insurance_policies': unexpected argument 'status'"
    );
}

#[test]
fn unknown_tool_is_the_only_non_string_outcome() {
    let registry = offline_registry();
    let call = ToolCall::new("get_weather", ToolArgs::new()).unwrap();

    assert!(registry.dispatch(&call).is_none());
    assert!(matches!(
        registry.try_dispatch(&call),
        Err(ToolError::NotFound { ref name }) if name == "get_weather"
    ));
}

#[test]
fn mock_tool_failures_flatten_to_strings() {
    let mock = Arc::new(
        MockTool::new("lookup")
            .with_response("known", "found it")
            .with_failure("broken", "backend unavailable"),
    );
    let registry = InMemoryToolRegistry::new().with_tool(mock.clone());

    let ask = |input: &str| {
        registry
            .dispatch(&ToolCall::new("lookup", ToolArgs::new().with("input", input)).unwrap())
            .unwrap()
    };

    assert_eq!(ask("known"), "found it");
    assert_eq!(ask("broken"), "Error running mock tool 'lookup': backend unavailable");
    assert_eq!(mock.call_history(), vec!["known", "broken"]);

    let args = mock
        .descriptor()
        .bind(ToolArgs::new().with("input", "broken"))
        .unwrap();
    assert_eq!(mock.execute(&args).unwrap_err().kind(), FailureKind::Internal);
}

#[test]
fn duplicate_registration_is_an_error() {
    let result = InMemoryToolRegistry::new()
        .with_tool(Arc::new(MockTool::new("lookup")))
        .try_with_tool(Arc::new(MockTool::new("lookup")));

    assert!(matches!(result, Err(ToolError::Duplicate { .. })));
}

#[test]
fn shipped_prompt_templates_load() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("prompts.yaml");
    let templates = policy_agent_core::PromptTemplates::load(path).unwrap();

    assert_eq!(
        templates.keys(),
        vec!["system_prompt", "planning", "managed_agent", "final_answer"]
    );
}
