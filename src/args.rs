pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CommandLineArgs {
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,
    #[clap(
        short = 'v',
        long,
        help = "Log at debug level",
        default_value = "false"
    )]
    verbose: bool,
}

impl CommandLineArgs {
    pub fn get() -> Self {
        CommandLineArgs::parse()
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_cli() {
        use clap::CommandFactory;
        CommandLineArgs::command().debug_assert()
    }

    #[test]
    fn test_parse_args() {
        let args = CommandLineArgs::parse_from(["capitol", "-p", "staging", "-v"]);
        assert_eq!(args.profile(), "staging");
        assert!(args.verbose());
    }

    #[test]
    fn test_defaults() {
        let args = CommandLineArgs::parse_from(["capitol"]);
        assert_eq!(args.profile(), "default");
        assert!(!args.verbose());
    }
}
