use async_trait::async_trait;

use crate::BoxError;

use super::command::Invocation;
use super::{Setter, SetterInputs};

/// Registers the organization's GitHub Packages feed as a NuGet source.
#[derive(Debug, Clone, Copy, Default)]
pub struct NuGetSetter;

impl NuGetSetter {
    pub fn invocation(&self, token: &str, inputs: &SetterInputs) -> Result<Invocation, BoxError> {
        let user = inputs.user.as_deref().ok_or("nuget needs a username")?;
        let org = inputs.org.as_deref().ok_or("nuget needs an organization")?;
        Ok(Invocation::new("dotnet")
            .arg("nuget")
            .arg("add")
            .arg("source")
            .arg(format!("https://nuget.pkg.github.com/{org}/index.json"))
            .arg("--name")
            .arg(format!("github-{org}"))
            .arg("--username")
            .arg(user)
            // `dotnet nuget add source` only takes the password as an argument.
            .arg("--password")
            .arg(token)
            .arg("--store-password-in-clear-text"))
    }
}

#[async_trait]
impl Setter for NuGetSetter {
    async fn apply(&self, token: &str, inputs: &SetterInputs) -> Result<(), BoxError> {
        self.invocation(token, inputs)?.run().await?;
        println!("NuGet source added.");
        Ok(())
    }
}
