use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use clap_verbosity_flag::InfoLevel;
use std::path::PathBuf;

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// `<prefix>.<key>=<value>` lines, one per key
    #[default]
    Properties,
    /// Every value of every key, as JSON
    Json,
}

/// rpmprops reads RPM spec files and publishes their preamble fields and `%define` macros
/// as flat properties, with `%{name}` references expanded.
///
/// Recognized fields are Name, Version, Release, BuildRequires, Requires, Summary, License,
/// Vendor, Packager, Provides, URL, Source<N>, Group, BuildRoot, BuildArch, AutoReqProv and
/// Prefix, in any letter case.
#[derive(Parser, Debug)]
#[clap(about, version)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Command,

    #[clap(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity<InfoLevel>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the properties of one or more spec files
    ///
    /// Keys are published as `<prefix>.<key>`. A key set more than once in the spec
    /// (e.g. several `Requires:` lines) publishes its last value; use `--format json`
    /// to see all of them.
    Props {
        /// Spec files to read
        #[clap(required = true)]
        specs: Vec<PathBuf>,

        /// Namespace prepended to every key, empty for none
        #[clap(short, long, env = "RPMPROPS_PREFIX", default_value = crate::publish::DEFAULT_PREFIX)]
        prefix: String,

        /// Output format
        #[clap(short, long, value_enum, default_value = "properties")]
        format: Format,
    },

    /// Print the value of a single key
    ///
    /// Fails if the key is not set, or if it is set more than once and `--all` is not given.
    Get {
        /// Spec file to read
        spec: PathBuf,

        /// Field name in lower case (`version`, `source0`) or macro name as defined
        key: String,

        /// Print every value of the key, one per line
        #[clap(short, long, action)]
        all: bool,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[clap(value_enum)]
        shell: Shell,
    },
}
