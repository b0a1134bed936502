use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable naming the file the final state is written to.
pub const SNAPSHOT_ENV: &str = "ARMLET_SNAPSHOT";

const DEFAULT_PROGRAM_NAME: &str = "armlet";

#[derive(Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Instruction source file.
    pub source: PathBuf,

    /// Where to dump the processor as JSON once the program ends.
    pub snapshot: Option<PathBuf>,
}

impl RunConfig {
    /// Reads the configuration from the process arguments and environment.
    pub fn from_env() -> Result<Self, String> {
        Self::from_args(std::env::args(), std::env::var_os(SNAPSHOT_ENV))
    }

    /// Expects exactly one argument after the program name. On failure the
    /// usage line is returned.
    pub fn from_args<I>(args: I, snapshot: Option<OsString>) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let program = args.next().unwrap_or_else(|| DEFAULT_PROGRAM_NAME.to_owned());
        let args = args.collect::<Vec<_>>();

        match args.as_slice() {
            [source] => Ok(Self {
                source: PathBuf::from(source),
                snapshot: snapshot.filter(|s| !s.is_empty()).map(PathBuf::from),
            }),
            _ => Err(format!("Usage: {program} <input_file>")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn single_source_argument() {
        let config = RunConfig::from_args(args(&["armlet", "prog.s"]), None).unwrap();

        assert_eq!(
            config,
            RunConfig {
                source: PathBuf::from("prog.s"),
                snapshot: None,
            }
        );
    }

    #[test]
    fn snapshot_from_environment() {
        let config =
            RunConfig::from_args(args(&["armlet", "prog.s"]), Some("out.json".into())).unwrap();
        assert_eq!(config.snapshot, Some(PathBuf::from("out.json")));

        let config = RunConfig::from_args(args(&["armlet", "prog.s"]), Some("".into())).unwrap();
        assert_eq!(config.snapshot, None);
    }

    #[test]
    fn wrong_argument_count() {
        assert_eq!(
            RunConfig::from_args(args(&["armlet"]), None),
            Err("Usage: armlet <input_file>".to_owned())
        );
        assert_eq!(
            RunConfig::from_args(args(&["./armlet", "a.s", "b.s"]), None),
            Err("Usage: ./armlet <input_file>".to_owned())
        );
    }
}
