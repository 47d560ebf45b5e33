use policy_agent_core::{BoundArgs, Tool, ToolDescriptor, ToolEffect, ToolFailure, ToolResult};
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::{Handle, RuntimeFlavor};

use super::client::SalesforceClient;
use super::credentials::{CredentialSource, EnvCredentialSource, SalesforceCredentials};
use super::error::SalesforceError;
use super::settings::SalesforceSettings;

/// The count query the tool runs unless told otherwise.
///
/// It counts direct-customer `Account` records even though the tool reports
/// the figure as "active insurance policies"; see `with_query` to point it
/// at a policy object instead.
pub const DEFAULT_COUNT_QUERY: &str = "SELECT COUNT() FROM Account WHERE Type = 'Customer - Direct'";

const ACTIVITY: &str = "fetching active insurance policies";

/// Drive an async operation to completion from synchronous code.
///
/// Inside a multi-threaded runtime the current worker is handed over with
/// `block_in_place`; inside a current-thread runtime the work moves to a
/// scoped thread with its own runtime; outside any runtime a short-lived one
/// is created.
fn run_async<F, Fut, T>(f: F) -> Result<T, SalesforceError>
where
    F: FnOnce() -> Fut + Send,
    Fut: Future<Output = Result<T, SalesforceError>>,
    T: Send,
{
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(|| handle.block_on(f()))
        }
        Ok(_) => std::thread::scope(|scope| {
            scope
                .spawn(|| block_on_fresh_runtime(f))
                .join()
                .unwrap_or_else(|_| {
                    Err(SalesforceError::Runtime(
                        "worker thread panicked".to_string(),
                    ))
                })
        }),
        Err(_) => block_on_fresh_runtime(f),
    }
}

fn block_on_fresh_runtime<F, Fut, T>(f: F) -> Result<T, SalesforceError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, SalesforceError>>,
{
    match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt.block_on(f()),
        Err(e) => Err(SalesforceError::Runtime(format!(
            "failed to create async runtime: {e}"
        ))),
    }
}

/// Where connection settings come from
#[derive(Debug, Clone)]
enum SettingsSource {
    Fixed(SalesforceSettings),
    /// Read `SALESFORCE_*` on every call
    Env,
}

impl SettingsSource {
    fn resolve(&self) -> Result<SalesforceSettings, SalesforceError> {
        match self {
            SettingsSource::Fixed(settings) => Ok(settings.clone()),
            SettingsSource::Env => Ok(SalesforceSettings::from_env()?),
        }
    }
}

/// `get_active_insurance_policies`
///
/// Settings and credentials are resolved on every call, so a bad setting or
/// a missing key is reported as the tool's answer before any request leaves
/// the process.
pub struct ActivePoliciesTool {
    descriptor: ToolDescriptor,
    credentials: Arc<dyn CredentialSource>,
    settings: SettingsSource,
    query: String,
}

impl ActivePoliciesTool {
    pub const NAME: &'static str = "get_active_insurance_policies";

    pub fn new(credentials: Arc<dyn CredentialSource>, settings: SalesforceSettings) -> Self {
        Self::with_source(credentials, SettingsSource::Fixed(settings))
    }

    /// Tool reading credentials and settings from the process environment
    /// at call time.
    pub fn from_env() -> Self {
        Self::with_source(Arc::new(EnvCredentialSource), SettingsSource::Env)
    }

    fn with_source(credentials: Arc<dyn CredentialSource>, settings: SettingsSource) -> Self {
        let descriptor = ToolDescriptor::builder(Self::NAME)
            .description(
                "A tool that fetches the number of active insurance policies from Salesforce. \
                 Returns a string indicating the number of active insurance policies.",
            )
            .effect(ToolEffect::External)
            .build()
            .unwrap_or_else(|e| unreachable!("static descriptor is valid: {e}"));

        Self {
            descriptor,
            credentials,
            settings,
            query: DEFAULT_COUNT_QUERY.to_string(),
        }
    }

    /// Replace the SOQL count query.
    pub fn with_query(mut self, soql: impl Into<String>) -> Self {
        self.query = soql.into();
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    fn count(&self) -> Result<u64, SalesforceError> {
        let settings = self.settings.resolve()?;
        let credentials = SalesforceCredentials::resolve(self.credentials.as_ref())?;
        tracing::info!("loaded Salesforce credentials");

        let client = SalesforceClient::new(settings)?;
        run_async(|| async {
            let session = client.login(&credentials).await?;
            tracing::info!(instance = %session.instance, "connected to Salesforce");

            let count = client.count(&session, &self.query).await?;
            tracing::info!(count, "fetched active insurance policies count");
            Ok(count)
        })
    }
}

impl Tool for ActivePoliciesTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn execute(&self, _args: &BoundArgs) -> ToolResult {
        self.count()
            .map(|count| format!("The number of active insurance policies is: {count}"))
            .map_err(|e| ToolFailure::new(e.kind(), ACTIVITY, e))
    }
}
