//! One invocation, from environment to output stream.

use std::fmt;
use std::io::{Read, Write};

use crate::config::load_descriptor;
use crate::emit::write_image_list;
use crate::{get_image_list, Connector, LogScope, Logger, Result};

/// Progress of a single invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    ConfigLoaded,
    Connected,
    Queried,
    Serialized,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::ConfigLoaded => "config",
            Stage::Connected => "connect",
            Stage::Queried => "query",
            Stage::Serialized => "serialize",
        };
        f.write_str(name)
    }
}

/// Runs one invocation: reads credentials through `env`, fetches the recent
/// images through `connector` and writes them to `output`.
///
/// `input` is accepted for the runtime's sake and never read. On error nothing
/// is written to `output`; the failure is logged and returned.
pub fn handle<R, W, F, C>(
    _input: R,
    output: W,
    env: F,
    connector: &C,
    logger: &dyn Logger,
) -> Result<()>
where
    R: Read,
    W: Write,
    F: Fn(&str) -> Option<String>,
    C: Connector + ?Sized,
{
    let scope = LogScope::new(logger);
    let logger = scope.logger();

    let result = run(output, env, connector, logger);
    if let Err(e) = &result {
        logger.error(&format!("failed at {} stage: {e}", e.stage()));
    }

    result
}

fn run<W, F, C>(output: W, env: F, connector: &C, logger: &dyn Logger) -> Result<()>
where
    W: Write,
    F: Fn(&str) -> Option<String>,
    C: Connector + ?Sized,
{
    let descriptor = load_descriptor(env, logger)?;
    logger.debug(&format!("stage: {}", Stage::ConfigLoaded));

    let list = get_image_list(connector, &descriptor, logger)?;
    logger.debug(&format!("stage: {}", Stage::Queried));

    write_image_list(&list, output)?;
    logger.debug(&format!("stage: {}", Stage::Serialized));

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io;

    use super::*;
    use crate::config::{ENV_ORACLE_PASSWORD, ENV_ORACLE_SERVICE_NAME, ENV_ORACLE_USERNAME};
    use crate::fetch::tests::{rows, Fail, FakeConnector};
    use crate::log::Level;
    use crate::{Error, ImageList, MemoryLogger};

    fn env() -> HashMap<String, String> {
        [
            (ENV_ORACLE_USERNAME, "admin"),
            (ENV_ORACLE_PASSWORD, "hunter2"),
            (ENV_ORACLE_SERVICE_NAME, "imagedb_high"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn writes_envelope_on_success() {
        let vars = env();
        let connector = FakeConnector {
            rows: rows(4),
            ..Default::default()
        };
        let logger = MemoryLogger::new();
        let mut out = Vec::new();

        handle(io::empty(), &mut out, |k| vars.get(k).cloned(), &connector, &logger).unwrap();

        let list: ImageList = serde_json::from_slice(&out).unwrap();
        assert_eq!(list.object, "list");
        assert_eq!(list.kind, "image");
        assert_eq!(list.total, 4);
        assert_eq!(logger.flush_count(), 1);
    }

    #[test]
    fn missing_variable_skips_the_database() {
        let mut vars = env();
        vars.remove(ENV_ORACLE_SERVICE_NAME);
        let connector = FakeConnector::default();
        let logger = MemoryLogger::new();
        let mut out = Vec::new();

        let err = handle(io::empty(), &mut out, |k| vars.get(k).cloned(), &connector, &logger)
            .unwrap_err();

        assert!(matches!(err, Error::MissingEnv(ENV_ORACLE_SERVICE_NAME)));
        assert_eq!(connector.connects.get(), 0);
        assert!(out.is_empty());
        assert!(logger.contains("ORACLE_SERVICENAME"));
    }

    #[test]
    fn query_failure_writes_nothing() {
        let vars = env();
        let connector = FakeConnector {
            rows: rows(4),
            fail: Some(Fail::Query),
            ..Default::default()
        };
        let logger = MemoryLogger::new();
        let mut out = Vec::new();

        let err = handle(io::empty(), &mut out, |k| vars.get(k).cloned(), &connector, &logger)
            .unwrap_err();

        assert_eq!(err.stage(), Stage::Queried);
        assert!(out.is_empty());
        assert_eq!(connector.open.get(), 0);
        assert_eq!(logger.flush_count(), 1);
        assert!(logger
            .at_level(Level::ERROR)
            .iter()
            .any(|m| m.starts_with("failed at query stage")));
    }

    #[test]
    fn input_is_ignored() {
        let vars = env();
        let connector = FakeConnector::default();
        let mut out = Vec::new();

        handle(
            &b"{\"anything\": true}"[..],
            &mut out,
            |k| vars.get(k).cloned(),
            &connector,
            &MemoryLogger::new(),
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["total"], 0);
        assert_eq!(value["data"], serde_json::json!([]));
    }
}
