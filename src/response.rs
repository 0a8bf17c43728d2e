//! Responses from the tree service and how they are printed.

use crate::proto;
use std::fmt;

/// A response from the tree service.
///
/// `code` is a status code chosen by the service. It is reported as-is and never interpreted by
/// the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// A tree was created.
    Create {
        /// The id of the new tree.
        id: i32,
        /// The token authorizing access to the new tree.
        token: String,
    },
    /// The service answered a tree deletion request.
    DeleteTree {
        /// The service's status code.
        code: i32,
        /// What the service has to say about the deletion.
        message: String,
    },
    /// The service answered a forced tree deletion.
    ForceTreeDelete {
        /// The service's status code.
        code: i32,
        /// What the service has to say about the deletion.
        message: String,
    },
    /// The outcome of an insertion.
    Insert {
        /// The service's status code.
        code: i32,
        /// The service's description of the outcome.
        result: String,
    },
    /// The outcome of a search.
    Search {
        /// The service's status code.
        code: i32,
        /// The value found for the key.
        value: String,
    },
    /// The outcome of a key deletion.
    Delete {
        /// The service's status code.
        code: i32,
        /// The service's description of the outcome.
        result: String,
    },
    /// Every pair of a tree.
    Traverse {
        /// The service's status code.
        code: i32,
        /// The service's description of the outcome.
        result: String,
        /// The pairs in the order the service returned them.
        pairs: Vec<(i32, String)>,
    },
}

impl Response {
    /// The status code reported by the service, if the response carries one.
    #[inline]
    pub const fn code(&self) -> Option<i32> {
        match self {
            Self::Create { .. } => None,
            Self::DeleteTree { code, .. }
            | Self::ForceTreeDelete { code, .. }
            | Self::Insert { code, .. }
            | Self::Search { code, .. }
            | Self::Delete { code, .. }
            | Self::Traverse { code, .. } => Some(*code),
        }
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create { id, token } => write!(f, "Tree created! Id = {id}, token = {token}"),
            Self::DeleteTree { code, message } => {
                write!(f, "Response code {code} - tree deletion alert. {message}")
            }
            Self::ForceTreeDelete { code, message } => {
                write!(f, "Response code {code} - tree has been deleted. {message}")
            }
            Self::Insert { code, result } => {
                write!(f, "Response code for insertion {code} - {result}")
            }
            Self::Search { code, value } => {
                write!(f, "Response code for search {code} - value is {value}")
            }
            Self::Delete { code, result } => {
                write!(f, "Response code for deletion {code} - {result}")
            }
            Self::Traverse {
                code,
                result,
                pairs,
            } => {
                write!(f, "Response code for traversal {code} - {result}")?;
                for (key, value) in pairs {
                    write!(f, "\n{{key: {key}, value: {value}}}")?;
                }
                Ok(())
            }
        }
    }
}

impl From<proto::CreateResponse> for Response {
    fn from(proto::CreateResponse { id, token }: proto::CreateResponse) -> Self {
        Self::Create { id, token }
    }
}

impl From<proto::DeleteTreeResponse> for Response {
    fn from(proto::DeleteTreeResponse { code, message }: proto::DeleteTreeResponse) -> Self {
        Self::DeleteTree { code, message }
    }
}

impl From<proto::ForceTreeDeleteResponse> for Response {
    fn from(
        proto::ForceTreeDeleteResponse { code, message }: proto::ForceTreeDeleteResponse,
    ) -> Self {
        Self::ForceTreeDelete { code, message }
    }
}

impl From<proto::InsertResponse> for Response {
    fn from(proto::InsertResponse { code, result }: proto::InsertResponse) -> Self {
        Self::Insert { code, result }
    }
}

impl From<proto::SearchResponse> for Response {
    fn from(proto::SearchResponse { code, value }: proto::SearchResponse) -> Self {
        Self::Search { code, value }
    }
}

impl From<proto::DeleteResponse> for Response {
    fn from(proto::DeleteResponse { code, result }: proto::DeleteResponse) -> Self {
        Self::Delete { code, result }
    }
}

impl From<proto::TraverseResponse> for Response {
    fn from(
        proto::TraverseResponse {
            code,
            result,
            pairs,
        }: proto::TraverseResponse,
    ) -> Self {
        Self::Traverse {
            code,
            result,
            pairs: pairs
                .into_iter()
                .map(|proto::Pair { key, value }| (key, value))
                .collect(),
        }
    }
}
