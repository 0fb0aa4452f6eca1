use std::time::Duration;

use crate::domain::candidates::build_candidates;
use crate::domain::environment::RuntimeEnv;
use crate::domain::errors::ClientError;
use crate::domain::report::{AuthSession, Report, ReportDraft, ReportPage, SignupForm};
use crate::interface_adapters::http::ReqwestTransport;
use crate::use_cases::resolve::Resolver;
use crate::use_cases::{auth, browse_reports, submit_report};

// Per-attempt deadline for read flows.
const READ_TIMEOUT: Duration = Duration::from_millis(5000);
// Writes get more headroom for multipart uploads.
const WRITE_TIMEOUT: Duration = Duration::from_millis(8000);

// Facade the CLI talks to. Candidates are recomputed from the environment
// on every call; no resolution state survives between calls.
pub struct ApiClient {
    env: RuntimeEnv,
    transport: ReqwestTransport,
}

impl ApiClient {
    pub fn new(env: RuntimeEnv) -> Self {
        Self {
            env,
            transport: ReqwestTransport::new(),
        }
    }

    pub fn candidates(&self) -> Vec<String> {
        build_candidates(&self.env)
    }

    fn read_resolver(&self) -> Resolver<ReqwestTransport> {
        Resolver::new(self.transport.clone(), READ_TIMEOUT)
    }

    fn write_resolver(&self) -> Resolver<ReqwestTransport> {
        Resolver::new(self.transport.clone(), WRITE_TIMEOUT)
    }

    pub async fn list_reports(&self, page: u32) -> Result<(String, ReportPage), ClientError> {
        browse_reports::list_reports(&self.read_resolver(), &self.candidates(), page).await
    }

    pub async fn get_report(&self, id: u64) -> Result<(String, Report), ClientError> {
        browse_reports::get_report(&self.read_resolver(), &self.candidates(), id).await
    }

    pub async fn seed_reports(&self) -> Result<(String, String), ClientError> {
        browse_reports::seed_reports(&self.write_resolver(), &self.candidates()).await
    }

    pub async fn submit_report(&self, draft: &ReportDraft) -> Result<(String, Report), ClientError> {
        submit_report::submit_report(&self.write_resolver(), &self.candidates(), draft).await
    }

    pub async fn signup(&self, form: &SignupForm) -> Result<(String, AuthSession), ClientError> {
        auth::signup(&self.write_resolver(), &self.candidates(), form).await
    }

    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(String, AuthSession), ClientError> {
        auth::login(&self.write_resolver(), &self.candidates(), username, password).await
    }
}
