#![doc = include_str!("../README.md")]

mod config;
mod telemetry;

use anyhow::Context;
use clap::Parser;
use config::{Action, CliArgs, Config};
use std::io::{self, BufWriter, Write};
use telemetry::init_telemetry;
use typeid::TypeId;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = Config::try_from(args)?;

    init_telemetry(&config.log)?;
    tracing::debug!(?config, "starting");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    run(config.action, &mut out)?;
    out.flush()?;
    Ok(())
}

fn run(action: Action, out: &mut impl Write) -> anyhow::Result<()> {
    match action {
        Action::New { prefix, count } => {
            for _ in 0..count {
                writeln!(out, "{}", TypeId::new(&prefix)?)?;
            }
            tracing::info!(count, prefix = %prefix, "generated identifiers");
        }
        Action::Parse { ids } => {
            for text in ids {
                let id = TypeId::parse(&text).with_context(|| format!("failed to parse {text:?}"))?;
                writeln!(out, "typeid: {id}")?;
                writeln!(out, "prefix: {}", id.prefix())?;
                writeln!(out, "suffix: {}", id.suffix())?;
                writeln!(out, "uuid:   {}", id.to_uuid_string())?;
            }
        }
        Action::Encode { prefix, uuid } => {
            let id = TypeId::from_uuid_str(&prefix, &uuid)
                .with_context(|| format!("failed to encode {uuid:?}"))?;
            writeln!(out, "{id}")?;
        }
        Action::Decode { id } => {
            let parsed = TypeId::parse(&id).with_context(|| format!("failed to parse {id:?}"))?;
            writeln!(out, "{}", parsed.to_uuid_string())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(action: Action) -> anyhow::Result<String> {
        let mut out = Vec::new();
        run(action, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn new_prints_count_identifiers() {
        let text = output(Action::New {
            prefix: "user".into(),
            count: 3,
        })
        .unwrap();
        let ids: Vec<TypeId> = text.lines().map(|l| l.parse().unwrap()).collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.iter().all(|id| id.prefix() == "user"));
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn encode_and_decode() {
        let encoded = output(Action::Encode {
            prefix: "prefix".into(),
            uuid: "01889c89-df6b-7f1c-a388-91396ec314bc".into(),
        })
        .unwrap();
        assert_eq!(encoded, "prefix_01h2e8kqvbfwea724h75qc655w\n");

        let decoded = output(Action::Decode {
            id: "prefix_01h2e8kqvbfwea724h75qc655w".into(),
        })
        .unwrap();
        assert_eq!(decoded, "01889c89-df6b-7f1c-a388-91396ec314bc\n");
    }

    #[test]
    fn parse_prints_components() {
        let text = output(Action::Parse {
            ids: vec!["00041061050r3gg28a1c60t3gf".into()],
        })
        .unwrap();
        assert_eq!(
            text,
            "typeid: 00041061050r3gg28a1c60t3gf\n\
             prefix: \n\
             suffix: 00041061050r3gg28a1c60t3gf\n\
             uuid:   00010203-0405-0607-0809-0a0b0c0d0e0f\n"
        );
    }

    #[test]
    fn parse_reports_the_bad_input() {
        let err = output(Action::Parse {
            ids: vec!["a_b_c".into()],
        })
        .unwrap_err();
        assert_eq!(err.to_string(), r#"failed to parse "a_b_c""#);
        assert!(err.root_cause().to_string().contains("invalid typeid"));
    }
}
