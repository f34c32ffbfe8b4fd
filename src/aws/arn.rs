//! ARN helpers

/// The components of an ARN: `arn:partition:service:region:account-id:resource`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn<'a> {
    pub partition: &'a str,
    pub service: &'a str,
    pub region: &'a str,
    pub account_id: &'a str,
    pub resource: &'a str,
}

impl<'a> Arn<'a> {
    /// Split an ARN into its components
    /// The resource part may itself contain `:`
    pub fn parse(arn: &'a str) -> Option<Self> {
        let mut parts = arn.splitn(6, ':');
        if parts.next()? != "arn" {
            return None;
        }
        let partition = parts.next().filter(|p| !p.is_empty())?;
        let service = parts.next()?;
        let region = parts.next()?;
        let account_id = parts.next()?;
        let resource = parts.next()?;

        Some(Self {
            partition,
            service,
            region,
            account_id,
            resource,
        })
    }
}

/// Alternate identifiers ("also known as") for a resource
pub fn arn_to_akas(arn: &str) -> Vec<String> {
    vec![arn.to_string()]
}
