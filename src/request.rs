//! Translation of command-line words into typed requests.
//!
//! Nothing in this module touches the network. A malformed command line is reported as a
//! [`ParseError`] and is never sent to the service.

use crate::tracing_shim::debug;
use std::fmt;

/// The id and token that authorize access to an existing tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Credentials {
    /// The id of the tree.
    pub id: i32,
    /// The token handed out when the tree was created.
    pub token: String,
}

impl Credentials {
    /// The id used when no id was provided.
    pub const NO_ID: i32 = -1;

    /// Credentials for the tree with the given id.
    #[inline]
    pub fn new(id: i32, token: impl Into<String>) -> Self {
        Self {
            id,
            token: token.into(),
        }
    }

    /// Credentials that name no tree.
    #[inline]
    pub const fn missing() -> Self {
        Self {
            id: Self::NO_ID,
            token: String::new(),
        }
    }

    /// Whether both an id and a token are present.
    #[inline]
    pub fn is_present(&self) -> bool {
        self.id != Self::NO_ID && !self.token.is_empty()
    }

    /// Whether either an id or a token was provided.
    fn is_partially_present(&self) -> bool {
        self.id != Self::NO_ID || !self.token.is_empty()
    }
}

impl Default for Credentials {
    fn default() -> Self {
        Self::missing()
    }
}

/// The command words understood by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// `newtree <maxLeafSize>`
    NewTree,
    /// `insert <key> <value>`
    Insert,
    /// `search <key>`
    Search,
    /// `delete <key>`
    Delete,
    /// `deletetree`
    DeleteTree,
    /// `forceTreeDelete`
    ForceTreeDelete,
    /// `traverse`
    Traverse,
}

impl Command {
    /// Every command, in the order they are listed in the help text.
    pub const ALL: [Self; 7] = [
        Self::NewTree,
        Self::Insert,
        Self::Search,
        Self::Delete,
        Self::DeleteTree,
        Self::ForceTreeDelete,
        Self::Traverse,
    ];

    /// The word that selects this command on the command line.
    #[inline]
    pub const fn word(self) -> &'static str {
        match self {
            Self::NewTree => "newtree",
            Self::Insert => "insert",
            Self::Search => "search",
            Self::Delete => "delete",
            Self::DeleteTree => "deletetree",
            Self::ForceTreeDelete => "forceTreeDelete",
            Self::Traverse => "traverse",
        }
    }

    /// The placeholders for the arguments following the command word.
    #[inline]
    pub const fn params(self) -> &'static [&'static str] {
        match self {
            Self::NewTree => &["<maxLeafSize>"],
            Self::Insert => &["<key>", "<value>"],
            Self::Search | Self::Delete => &["<key>"],
            Self::DeleteTree | Self::ForceTreeDelete | Self::Traverse => &[],
        }
    }

    /// Look up a command by its word. Matching is case-sensitive.
    #[inline]
    pub fn from_word(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|command| command.word() == word)
    }

    /// Whether the command operates on an existing tree.
    #[inline]
    pub const fn needs_credentials(self) -> bool {
        !matches!(self, Self::NewTree)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

/// A request for the tree service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Create a new tree whose leaves hold at most `max_leaf_size` pairs.
    NewTree {
        /// The most pairs a leaf holds before it splits.
        max_leaf_size: i32,
    },
    /// Insert a pair into a tree.
    Insert {
        /// The tree to operate on.
        credentials: Credentials,
        /// The key of the pair.
        key: i32,
        /// The value to store.
        value: String,
    },
    /// Look up the value stored for a key.
    Search {
        /// The tree to operate on.
        credentials: Credentials,
        /// The key of the pair.
        key: i32,
    },
    /// Remove a key and its value.
    Delete {
        /// The tree to operate on.
        credentials: Credentials,
        /// The key of the pair.
        key: i32,
    },
    /// Ask the service to delete a tree.
    DeleteTree {
        /// The tree to operate on.
        credentials: Credentials,
    },
    /// Delete a tree without further confirmation.
    ForceTreeDelete {
        /// The tree to operate on.
        credentials: Credentials,
    },
    /// List every pair in a tree in key order.
    Traverse {
        /// The tree to operate on.
        credentials: Credentials,
    },
}

impl Request {
    /// Build a request from the positional words of a command line.
    ///
    /// `flags` holds the credentials given through `--id` and `--token`. Alternatively the
    /// credentials can lead the words as `<id> <token> <command> ...`; giving both forms is an
    /// error. `newtree` ignores credentials entirely.
    pub fn parse<S>(flags: Credentials, words: &[S]) -> Result<Self, ParseError>
    where
        S: AsRef<str>,
    {
        let (positional, words) = split_credentials(words);

        let Some((word, args)) = words.split_first() else {
            return Err(ParseError::NoCommand);
        };
        let word = word.as_ref();
        let command = Command::from_word(word).ok_or_else(|| ParseError::UnknownCommand {
            word: word.to_owned(),
        })?;

        let credentials = match positional {
            Some(_) if command.needs_credentials() && flags.is_partially_present() => {
                return Err(ParseError::DuplicateCredentials);
            }
            Some(positional) => positional,
            None => flags,
        };

        let expected = command.params().len();
        if args.len() != expected {
            return Err(ParseError::WrongArity {
                command,
                expected,
                found: args.len(),
            });
        }
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();

        // Keys are validated before credentials.
        let request = match command {
            Command::NewTree => Self::NewTree {
                max_leaf_size: parse_leaf_size(args[0])?,
            },
            Command::Insert => {
                let key = parse_key(args[0])?;
                Self::Insert {
                    credentials: require(credentials)?,
                    key,
                    value: args[1].to_owned(),
                }
            }
            Command::Search => {
                let key = parse_key(args[0])?;
                Self::Search {
                    credentials: require(credentials)?,
                    key,
                }
            }
            Command::Delete => {
                let key = parse_key(args[0])?;
                Self::Delete {
                    credentials: require(credentials)?,
                    key,
                }
            }
            Command::DeleteTree => Self::DeleteTree {
                credentials: require(credentials)?,
            },
            Command::ForceTreeDelete => Self::ForceTreeDelete {
                credentials: require(credentials)?,
            },
            Command::Traverse => Self::Traverse {
                credentials: require(credentials)?,
            },
        };

        debug!(%command, "prepared request");
        Ok(request)
    }

    /// The command this request was built from.
    #[inline]
    pub const fn command(&self) -> Command {
        match self {
            Self::NewTree { .. } => Command::NewTree,
            Self::Insert { .. } => Command::Insert,
            Self::Search { .. } => Command::Search,
            Self::Delete { .. } => Command::Delete,
            Self::DeleteTree { .. } => Command::DeleteTree,
            Self::ForceTreeDelete { .. } => Command::ForceTreeDelete,
            Self::Traverse { .. } => Command::Traverse,
        }
    }

    /// The credentials sent along with the request, if any.
    #[inline]
    pub const fn credentials(&self) -> Option<&Credentials> {
        match self {
            Self::NewTree { .. } => None,
            Self::Insert { credentials, .. }
            | Self::Search { credentials, .. }
            | Self::Delete { credentials, .. }
            | Self::DeleteTree { credentials }
            | Self::ForceTreeDelete { credentials }
            | Self::Traverse { credentials } => Some(credentials),
        }
    }
}

/// Split off `<id> <token>` from the front of the words.
///
/// Leading words are credentials when the first is an integer and the second is not a command.
/// A token spelled like a command word therefore has to be given with `--token`.
fn split_credentials<S>(words: &[S]) -> (Option<Credentials>, &[S])
where
    S: AsRef<str>,
{
    if let [id, token, rest @ ..] = words {
        if let Ok(id) = id.as_ref().parse::<i32>() {
            if Command::from_word(token.as_ref()).is_none() {
                return (Some(Credentials::new(id, token.as_ref())), rest);
            }
        }
    }
    (None, words)
}

/// Reject credentials that lack an id or a token.
fn require(credentials: Credentials) -> Result<Credentials, ParseError> {
    if credentials.is_present() {
        Ok(credentials)
    } else {
        Err(ParseError::MissingCredentials {
            id: credentials.id,
            token: credentials.token,
        })
    }
}

/// Parse a `<key>` argument.
fn parse_key(word: &str) -> Result<i32, ParseError> {
    word.parse().map_err(|_| ParseError::InvalidKey {
        word: word.to_owned(),
    })
}

/// Parse a `<maxLeafSize>` argument. A tree needs room for at least one pair per leaf.
fn parse_leaf_size(word: &str) -> Result<i32, ParseError> {
    match word.parse() {
        Ok(size) if size >= 1 => Ok(size),
        _ => Err(ParseError::InvalidLeafSize {
            word: word.to_owned(),
        }),
    }
}

/// Why a command line could not be turned into a [`Request`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No command word was given.
    NoCommand,
    /// The command word is not known.
    UnknownCommand {
        /// The offending word.
        word: String,
    },
    /// The command was given the wrong number of arguments.
    WrongArity {
        /// The command being parsed.
        command: Command,
        /// The number of arguments the command takes.
        expected: usize,
        /// The number of arguments given.
        found: usize,
    },
    /// A `<key>` is not a 32-bit integer.
    InvalidKey {
        /// The offending word.
        word: String,
    },
    /// A `<maxLeafSize>` is not a positive 32-bit integer.
    InvalidLeafSize {
        /// The offending word.
        word: String,
    },
    /// The command needs an id and a token but at least one is missing.
    MissingCredentials {
        /// The id that was given.
        id: i32,
        /// The token that was given.
        token: String,
    },
    /// Credentials were given both as flags and as leading words.
    DuplicateCredentials,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCommand => f.write_str("too few arguments - check your command"),
            Self::UnknownCommand { word } => write!(f, "unknown command `{word}`"),
            Self::WrongArity {
                command,
                expected,
                found,
            } => write!(
                f,
                "wrong number of arguments for `{command}`: expected {expected}, got {found}"
            ),
            Self::InvalidKey { word } => write!(f, "invalid input for <key>: {word}"),
            Self::InvalidLeafSize { word } => {
                write!(f, "invalid input for <maxLeafSize>: {word}")
            }
            Self::MissingCredentials { id, token } => {
                write!(f, "Id = {id} or token = {token} invalid")
            }
            Self::DuplicateCredentials => {
                f.write_str("tree id and token given both as flags and as arguments")
            }
        }
    }
}

impl std::error::Error for ParseError {}
