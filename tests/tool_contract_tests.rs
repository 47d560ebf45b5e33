//! Property-Based Tests for the Tool Contract
//!
//! Every tool answers with a string whatever its inputs, and the same call
//! against the same state answers the same way.

use chrono::{TimeZone, Utc};
use chrono_tz::TZ_VARIANTS;
use policy_agent_core::{ToolArgs, ToolCall};
use policy_agent_tools::{
    FixedClock, InMemoryToolRegistry, MagicTool, TimezoneClockTool, ToolRegistry,
};
use proptest::prelude::*;
use regex::Regex;
use std::sync::{Arc, LazyLock};

static LOCAL_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^The current local time in .+ is: \d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$").unwrap()
});

fn registry() -> InMemoryToolRegistry {
    let instant = Utc.with_ymd_and_hms(2024, 3, 10, 6, 59, 59).unwrap();
    InMemoryToolRegistry::new()
        .with_tool(Arc::new(MagicTool::new()))
        .with_tool(Arc::new(TimezoneClockTool::with_clock(Arc::new(
            FixedClock(instant),
        ))))
}

fn ask_time(registry: &InMemoryToolRegistry, timezone: &str) -> String {
    let call = ToolCall::new(
        "get_current_time_in_timezone",
        ToolArgs::new().with("timezone", timezone),
    )
    .unwrap();
    registry.dispatch(&call).unwrap()
}

proptest! {
    #[test]
    fn placeholder_ignores_its_inputs(arg1 in ".*", arg2 in any::<i64>()) {
        let call = ToolCall::new(
            "my_custom_tool",
            ToolArgs::new().with("arg1", arg1).with("arg2", arg2),
        )
        .unwrap();

        let answer = registry().dispatch(&call);
        prop_assert_eq!(answer.as_deref(), Some("What magic will you build ?"));
    }

    #[test]
    fn every_iana_zone_formats(index in 0..TZ_VARIANTS.len()) {
        let name = TZ_VARIANTS[index].name();
        let answer = ask_time(&registry(), name);

        prop_assert!(LOCAL_TIME.is_match(&answer), "unexpected answer: {}", answer);
        let expected_prefix = format!("The current local time in {name} is: ");
        prop_assert!(answer.starts_with(&expected_prefix));
    }

    #[test]
    fn unknown_zones_answer_with_error_string(suffix in "[A-Za-z_]{1,16}") {
        let zone = format!("Not/{suffix}");
        let answer = ask_time(&registry(), &zone);

        let expected_prefix = format!("Error fetching time for timezone '{zone}'");
        prop_assert!(answer.starts_with(&expected_prefix));
    }

    #[test]
    fn identical_calls_give_identical_answers(index in 0..TZ_VARIANTS.len()) {
        let registry = registry();
        let name = TZ_VARIANTS[index].name();
        prop_assert_eq!(ask_time(&registry, name), ask_time(&registry, name));
    }
}

#[test]
fn every_zone_in_the_database_is_accepted_by_the_system_clock() {
    let registry = InMemoryToolRegistry::new().with_tool(Arc::new(TimezoneClockTool::new()));

    for tz in TZ_VARIANTS.iter() {
        let answer = ask_time(&registry, tz.name());
        assert!(LOCAL_TIME.is_match(&answer), "{}: {answer}", tz.name());
    }
}

#[test]
fn wrongly_typed_timezone_is_rejected_before_the_tool_runs() {
    let call = ToolCall::new(
        "get_current_time_in_timezone",
        ToolArgs::new().with("timezone", 42i64),
    )
    .unwrap();

    assert_eq!(
        registry().dispatch(&call).unwrap(),
        "Error invoking tool 'get_current_time_in_timezone': \
         argument 'timezone' must be string, got integer"
    );
}
