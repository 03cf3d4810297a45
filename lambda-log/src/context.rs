//! The parts of a function invocation that logging cares about.

/// Host name reported when the function ARN carries no region.
pub const FALLBACK_HOSTNAME: &str = "aws-lambda";

/// Program name reported when the function name is unknown.
pub const FALLBACK_PROGRAM: &str = "default";

/// Metadata describing the current function execution.
///
/// Only four fields are read; anything else in the runtime's context object is
/// ignored. Every field is optional, and an empty string counts as absent.
///
/// ```rust
/// use lambda_log::InvocationContext;
///
/// let context: InvocationContext = serde_json::from_str(r#"{
///     "functionName": "thumbnailer",
///     "invokedFunctionArn": "arn:aws:lambda:eu-north-1:123456789:function:thumbnailer",
///     "awsRequestId": "c6af9ac6-7b61-11e6-9a41-93e8deadbeef",
///     "functionVersion": "$LATEST",
///     "memoryLimitInMB": "128"
/// }"#).unwrap();
///
/// assert!(context.is_live());
/// assert_eq!(context.hostname(), "aws-lambda-eu-north-1");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationContext {
    /// Name of the running function
    pub function_name: Option<String>,
    /// Colon-delimited ARN the function was invoked through
    pub invoked_function_arn: Option<String>,
    /// Id of the current request; only present when running live
    pub aws_request_id: Option<String>,
    /// Deployed version of the function
    pub function_version: Option<String>,
}

impl InvocationContext {
    /// An empty context, as seen when running outside the function runtime.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the function name.
    pub fn with_function_name(mut self, function_name: impl Into<String>) -> Self {
        self.function_name = Some(function_name.into());
        self
    }

    /// Sets the invoked function ARN.
    pub fn with_invoked_function_arn(mut self, arn: impl Into<String>) -> Self {
        self.invoked_function_arn = Some(arn.into());
        self
    }

    /// Sets the request id.
    pub fn with_aws_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.aws_request_id = Some(request_id.into());
        self
    }

    /// Sets the function version.
    pub fn with_function_version(mut self, version: impl Into<String>) -> Self {
        self.function_version = Some(version.into());
        self
    }

    /// The request id, if it is set to something non-empty.
    pub fn request_id(&self) -> Option<&str> {
        self.aws_request_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Is this context from a live invocation?
    pub fn is_live(&self) -> bool {
        self.request_id().is_some()
    }

    /// The program name to report to a remote collector.
    pub fn program(&self) -> &str {
        self.function_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_PROGRAM)
    }

    /// The host name to report to a remote collector.
    pub fn hostname(&self) -> String {
        hostname_for_arn(self.invoked_function_arn.as_deref().unwrap_or_default())
    }
}

/// Derives a collector host name from an ARN-shaped identifier.
///
/// The fourth colon-delimited segment (the region) is appended to
/// [`FALLBACK_HOSTNAME`]. Identifiers too short to have one, or with that
/// segment empty, get the bare fallback.
pub fn hostname_for_arn(arn: &str) -> String {
    match arn.split(':').nth(3) {
        Some(region) if !region.is_empty() => format!("{FALLBACK_HOSTNAME}-{region}"),
        _ => FALLBACK_HOSTNAME.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hostname_uses_region_segment() {
        assert_eq!(
            hostname_for_arn("arn:aws:lambda:us-east-1:123456789:function:foo"),
            "aws-lambda-us-east-1"
        );
    }

    #[test]
    fn short_or_empty_arn_falls_back() {
        assert_eq!(hostname_for_arn("badarn"), "aws-lambda");
        assert_eq!(hostname_for_arn("arn:aws:lambda"), "aws-lambda");
        assert_eq!(hostname_for_arn("arn:aws:lambda::123:function:foo"), "aws-lambda");
        assert_eq!(hostname_for_arn(""), "aws-lambda");
        assert_eq!(InvocationContext::new().hostname(), "aws-lambda");
    }

    #[test]
    fn program_falls_back_when_name_missing() {
        assert_eq!(InvocationContext::new().program(), "default");
        assert_eq!(InvocationContext::new().with_function_name("").program(), "default");
        assert_eq!(InvocationContext::new().with_function_name("f").program(), "f");
    }

    #[test]
    fn empty_request_id_is_not_live() {
        let context = InvocationContext::new().with_aws_request_id("");
        assert!(!context.is_live());
        assert!(InvocationContext::new().with_aws_request_id("abc").is_live());
    }

    #[test]
    fn deserializes_partial_context() {
        let context: InvocationContext =
            serde_json::from_str(r#"{ "functionName": "f", "awsRequestId": null }"#).unwrap();
        assert_eq!(context, InvocationContext::new().with_function_name("f"));
    }
}
