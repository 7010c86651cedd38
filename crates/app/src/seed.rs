//! Viewer command line: `--seed N`, `--seed=N`, `--target-nodes N`, `--target-nodes=N`.
//!
//! Parsed by hand so macroquad's own window arguments pass through untouched.

use std::error::Error;
use std::fmt;
use std::process;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const SEED_FLAG: &str = "--seed";
const TARGET_NODES_FLAG: &str = "--target-nodes";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewerArgs {
    pub seed: SeedChoice,
    pub target_nodes: Option<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgError {
    MissingValue(&'static str),
    Repeated(&'static str),
    NotANumber { flag: &'static str, value: String },
    ZeroTargetNodes,
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingValue(flag) => write!(f, "missing value for {flag}"),
            Self::Repeated(flag) => write!(f, "{flag} provided more than once"),
            Self::NotANumber { flag, value } => {
                write!(f, "{flag} value '{value}' must be a non-negative number")
            }
            Self::ZeroTargetNodes => write!(f, "{TARGET_NODES_FLAG} must be at least 1"),
        }
    }
}

impl Error for ArgError {}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    mix_seed(entropy)
}

/// Parses `args` (program name first). Unrecognised arguments are ignored.
pub fn parse_viewer_args(args: &[String], generated_seed: u64) -> Result<ViewerArgs, ArgError> {
    let mut seed = None;
    let mut target_nodes = None;
    let mut rest = args.iter().skip(1);

    while let Some(argument) = rest.next() {
        let (flag, inline) = match argument.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (argument.as_str(), None),
        };
        let flag = match flag {
            SEED_FLAG => SEED_FLAG,
            TARGET_NODES_FLAG => TARGET_NODES_FLAG,
            _ => continue,
        };
        let value = match inline {
            Some(value) => value,
            None => rest.next().ok_or(ArgError::MissingValue(flag))?.as_str(),
        };

        if flag == SEED_FLAG {
            if seed.is_some() {
                return Err(ArgError::Repeated(flag));
            }
            seed = Some(parse_number::<u64>(flag, value)?);
        } else {
            if target_nodes.is_some() {
                return Err(ArgError::Repeated(flag));
            }
            match parse_number::<usize>(flag, value)? {
                0 => return Err(ArgError::ZeroTargetNodes),
                count => target_nodes = Some(count),
            }
        }
    }

    let seed = match seed {
        Some(seed) => SeedChoice::Cli(seed),
        None => SeedChoice::Generated(generated_seed),
    };
    Ok(ViewerArgs { seed, target_nodes })
}

fn parse_number<T: FromStr>(flag: &'static str, value: &str) -> Result<T, ArgError> {
    value.parse::<T>().map_err(|_| ArgError::NotANumber { flag, value: value.to_string() })
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    fn parse(parts: &[&str]) -> Result<ViewerArgs, ArgError> {
        parse_viewer_args(&as_args(parts), 9_876_543)
    }

    #[test]
    fn falls_back_to_the_generated_seed() {
        let parsed = parse(&["app"]).expect("no flags is valid");
        assert_eq!(parsed.seed, SeedChoice::Generated(9_876_543));
        assert_eq!(parsed.target_nodes, None);
    }

    #[test]
    fn accepts_separate_and_inline_values() {
        let parsed = parse(&["app", "--seed", "4242", "--target-nodes=30"]).expect("valid flags");
        assert_eq!(parsed.seed, SeedChoice::Cli(4_242));
        assert_eq!(parsed.seed.value(), 4_242);
        assert_eq!(parsed.target_nodes, Some(30));

        let parsed = parse(&["app", "--seed=2026"]).expect("inline seed");
        assert_eq!(parsed.seed, SeedChoice::Cli(2_026));
    }

    #[test]
    fn ignores_unrelated_arguments() {
        let parsed = parse(&["app", "--fullscreen", "-v", "--seedling=3"]).expect("ignored");
        assert_eq!(parsed.seed, SeedChoice::Generated(9_876_543));
    }

    #[test]
    fn reports_a_missing_value() {
        assert_eq!(parse(&["app", "--seed"]), Err(ArgError::MissingValue("--seed")));
        let err = parse(&["app", "--target-nodes"]).expect_err("missing count should error");
        assert!(err.to_string().contains("missing"), "error should explain missing value: {err}");
    }

    #[test]
    fn rejects_non_numbers_and_zero_targets() {
        let err = parse(&["app", "--seed=abc"]).expect_err("non-numeric seed should error");
        assert!(err.to_string().contains("number"), "error should explain the format: {err}");
        assert!(matches!(parse(&["app", "--seed=-1"]), Err(ArgError::NotANumber { .. })));
        assert_eq!(parse(&["app", "--target-nodes", "0"]), Err(ArgError::ZeroTargetNodes));
    }

    #[test]
    fn rejects_repeated_flags() {
        let err = parse(&["app", "--seed=1", "--seed", "2"]).expect_err("duplicate seeds");
        assert_eq!(err, ArgError::Repeated("--seed"));
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn generated_seed_changes_between_calls() {
        let first = generate_runtime_seed();
        let second = generate_runtime_seed();
        assert_ne!(first, second, "runtime seed generation should vary per call");
    }
}
