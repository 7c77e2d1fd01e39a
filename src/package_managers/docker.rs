use std::time::Duration;

use async_trait::async_trait;

use crate::BoxError;

use super::command::Invocation;
use super::{Setter, SetterInputs};

pub const REGISTRY: &str = "docker.pkg.github.com";
const LOGIN_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, Copy, Default)]
pub struct DockerSetter;

impl DockerSetter {
    pub fn invocation(&self, token: &str, inputs: &SetterInputs) -> Result<Invocation, BoxError> {
        let user = inputs
            .user
            .as_deref()
            .ok_or("docker login needs a username")?;
        Ok(Invocation::new("docker")
            .arg("login")
            .arg("--username")
            .arg(user)
            .arg("--password-stdin")
            .arg(REGISTRY)
            .stdin(token)
            .timeout(LOGIN_TIMEOUT))
    }
}

#[async_trait]
impl Setter for DockerSetter {
    async fn apply(&self, token: &str, inputs: &SetterInputs) -> Result<(), BoxError> {
        self.invocation(token, inputs)?.run().await?;
        Ok(())
    }
}
