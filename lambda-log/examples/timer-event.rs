//! Logs a couple of lines and a timer event to stdout.
//!
//! Pass a collector as `host:port` to also forward them, e.g.
//! `cargo run --example timer-event -- logs1.example.com:12345`.

use lambda_log::{DestinationConfig, InvocationContext, create_logger};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let context: InvocationContext = serde_json::from_str(
        r#"{
            "functionName": "timer-event-example",
            "invokedFunctionArn": "arn:aws:lambda:eu-north-1:123456789012:function:timer-event-example",
            "awsRequestId": "8f5c3e0a-3c1e-4c7b-9d2e-6a1f0b7c2d9e",
            "functionVersion": "$LATEST"
        }"#,
    )?;

    let destination = match std::env::args().nth(1) {
        Some(target) => {
            let (host, port) = target
                .rsplit_once(':')
                .ok_or("expected a collector as host:port")?;
            Some(DestinationConfig::new(host, port.parse()?))
        }
        None => None,
    };

    let logger = create_logger(&context, destination.as_ref())?;
    logger.info(format!("remote collector attached: {}", logger.has_remote_sink()))?;

    let timer = logger.start_timer("sum-of-squares");
    let total: u64 = (1..=1_000_000u64).map(|n| n * n % 7).sum();
    logger.info(format!("computed {total}"))?;
    logger.timer_event(&timer.finish("summed a million squares"))?;

    logger.flush()?;
    Ok(())
}
