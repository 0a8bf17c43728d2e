//! Command-line interface for treecli.

use clap::Parser;
use treecli::Credentials;

/// The commands understood after the flags, shown at the end of `--help`.
const COMMANDS: &str = "\
Commands:
  newtree <maxLeafSize>    Create a tree whose leaves hold at most <maxLeafSize> pairs.
                           Prints the id and token of the new tree.
  insert <key> <value>     Insert a pair into the tree.
  search <key>             Print the value stored for <key>.
  delete <key>             Remove <key> and its value from the tree.
  deletetree               Ask the service to delete the tree.
  forceTreeDelete          Delete the tree without further confirmation.
  traverse                 Print every pair of the tree.

Every command except `newtree` operates on an existing tree and needs its id and token. Give
them either as flags or as the first two words:

  treecli --id <ID> --token <TOKEN> insert 42 answer
  treecli <ID> <TOKEN> insert 42 answer

A token that is itself a command word, such as `traverse`, can only be given with --token.

Keys are 32-bit integers and values are strings.";

/// Send a request to a remote key-value tree service and print the response.
#[derive(Debug, Parser)]
#[command(version, after_long_help = COMMANDS)]
pub(crate) struct Args {
    /// The address of the tree service.
    #[arg(long, default_value = "127.0.0.1:8091", value_name = "HOST:PORT")]
    pub(crate) remote: String,
    /// Seconds to wait for the service, both to connect and to answer.
    #[arg(long, default_value_t = 5, value_name = "SECONDS")]
    pub(crate) timeout: u64,
    /// The id of the tree to operate on.
    #[arg(long, default_value_t = Credentials::NO_ID, allow_negative_numbers = true)]
    pub(crate) id: i32,
    /// The token of the tree to operate on.
    #[arg(long, default_value = "")]
    pub(crate) token: String,
    /// The command followed by its arguments. See the list below.
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub(crate) words: Vec<String>,
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::CommandFactory as _;
    use treecli::request::Command;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_help_lists_commands() {
        let help = Args::command().render_long_help().to_string();
        for command in Command::ALL {
            assert!(help.contains(command.word()), "{command} missing from help");
        }
        assert!(help.contains("can only be given with --token"));
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["treecli", "newtree", "4"]);
        assert_eq!(args.remote, "127.0.0.1:8091");
        assert_eq!(args.timeout, 5);
        assert_eq!(args.id, Credentials::NO_ID);
        assert_eq!(args.token, "");
        assert_eq!(args.words, ["newtree", "4"]);
    }

    #[test]
    fn test_flags_and_negative_key() {
        let args = Args::parse_from([
            "treecli", "--id", "3", "--token", "tok", "--remote", "10.0.0.1:9000", "insert",
            "-7", "seven",
        ]);
        assert_eq!(args.id, 3);
        assert_eq!(args.token, "tok");
        assert_eq!(args.remote, "10.0.0.1:9000");
        assert_eq!(args.words, ["insert", "-7", "seven"]);
    }
}
