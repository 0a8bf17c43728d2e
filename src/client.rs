//! A connection to the tree service.

use crate::proto::tree_client::TreeClient as RpcClient;
use crate::request::{Credentials, Request};
use crate::response::Response;
use crate::tracing_shim::{debug, debug_span, Instrument};
use crate::{proto, Error};
use std::time::Duration;
use tonic::transport::{Channel, Endpoint};

/// A client for the tree service.
///
/// Every request is a unary RPC, so each call to [`dispatch`](Self::dispatch) waits for exactly
/// the response belonging to its request.
#[derive(Debug, Clone)]
pub struct TreeClient {
    /// The generated gRPC client.
    inner: RpcClient<Channel>,
}

impl TreeClient {
    /// Connect to the service listening at `remote` (`host:port`).
    ///
    /// `timeout` bounds both establishing the connection and every later request.
    pub async fn connect(remote: &str, timeout: Duration) -> Result<Self, Error> {
        let endpoint = Endpoint::from_shared(format!("http://{remote}"))
            .map_err(|source| Error::InvalidRemote {
                remote: remote.to_owned(),
                source,
            })?
            .connect_timeout(timeout)
            .timeout(timeout);

        debug!(remote, "connecting to tree service");
        let channel = endpoint
            .connect()
            .await
            .map_err(|source| Error::Unreachable {
                remote: remote.to_owned(),
                source,
            })?;
        Ok(Self::from_channel(channel))
    }

    /// Use an already established channel.
    #[inline]
    pub fn from_channel(channel: Channel) -> Self {
        Self {
            inner: RpcClient::new(channel),
        }
    }

    /// Send a request and wait for its response.
    pub async fn dispatch(&mut self, request: Request) -> Result<Response, Error> {
        let command = request.command();
        let span = debug_span!(
            "dispatch",
            %command,
            tree = ?request.credentials().map(|credentials| credentials.id)
        );
        let response = self.send(request).instrument(span).await?;
        debug!(%command, code = ?response.code(), "received response");
        Ok(response)
    }

    /// Map a request onto its RPC.
    async fn send(&mut self, request: Request) -> Result<Response, Error> {
        let client = &mut self.inner;
        let response: Response = match request {
            Request::NewTree { max_leaf_size } => client
                .create(proto::CreateRequest { max_leaf_size })
                .await?
                .into_inner()
                .into(),
            Request::Insert {
                credentials: Credentials { id, token },
                key,
                value,
            } => client
                .insert(proto::InsertRequest {
                    id,
                    token,
                    key,
                    value,
                })
                .await?
                .into_inner()
                .into(),
            Request::Search {
                credentials: Credentials { id, token },
                key,
            } => client
                .search(proto::SearchRequest { id, token, key })
                .await?
                .into_inner()
                .into(),
            Request::Delete {
                credentials: Credentials { id, token },
                key,
            } => client
                .delete(proto::DeleteRequest { id, token, key })
                .await?
                .into_inner()
                .into(),
            Request::DeleteTree {
                credentials: Credentials { id, token },
            } => client
                .delete_tree(proto::DeleteTreeRequest { id, token })
                .await?
                .into_inner()
                .into(),
            Request::ForceTreeDelete {
                credentials: Credentials { id, token },
            } => client
                .force_tree_delete(proto::ForceTreeDeleteRequest { id, token })
                .await?
                .into_inner()
                .into(),
            Request::Traverse {
                credentials: Credentials { id, token },
            } => client
                .traverse(proto::TraverseRequest { id, token })
                .await?
                .into_inner()
                .into(),
        };
        Ok(response)
    }
}
