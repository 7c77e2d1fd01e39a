use async_trait::async_trait;

use crate::BoxError;

use super::command::Invocation;
use super::{Setter, SetterInputs};

pub const REGISTRY: &str = "//npm.pkg.github.com";

/// Writes the token into the global npm config, or the user config when
/// `local` is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct NpmSetter;

impl NpmSetter {
    pub fn invocation(&self, token: &str, inputs: &SetterInputs) -> Invocation {
        let invocation = Invocation::new("npm")
            .arg("config")
            .arg("set")
            .arg(format!("{REGISTRY}/:_authToken={token}"));
        if inputs.local {
            invocation
        } else {
            invocation.arg("--location=global")
        }
    }
}

#[async_trait]
impl Setter for NpmSetter {
    async fn apply(&self, token: &str, inputs: &SetterInputs) -> Result<(), BoxError> {
        self.invocation(token, inputs).run().await?;
        println!("Registry config set.");
        Ok(())
    }
}
