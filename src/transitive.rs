//! Serve a tree service in-process and talk to it through an in-memory pipe.
//!
//! This lets the whole request path, including the gRPC encoding, run without opening a socket.

use crate::proto::tree_server::{Tree, TreeServer};
use crate::TreeClient;
use hyper_util::rt::TokioIo;
use tonic::transport::{Endpoint, Server, Uri};

/// Buffer size of the in-memory pipe, in bytes.
const DUPLEX_SIZE: usize = 1024;

/// Serve `service` on a background task and return a client connected to it.
///
/// The server task ends when the client and all of its clones are dropped.
pub async fn tree_client<S>(service: S) -> Result<TreeClient, tonic::transport::Error>
where
    S: Tree,
{
    let (client, server) = tokio::io::duplex(DUPLEX_SIZE);

    let _join_handle = tokio::spawn(async move {
        Server::builder()
            .add_service(TreeServer::new(service))
            .serve_with_incoming(tokio_stream::once(Ok::<_, std::io::Error>(server)))
            .await
    });

    let mut client = Some(client);
    // The URI is never resolved. It only has to be valid.
    let channel = Endpoint::try_from("http://[::]:50051")?
        .connect_with_connector(tower::service_fn(move |_: Uri| {
            let client = client.take();
            async move {
                if let Some(client) = client {
                    Ok(TokioIo::new(client))
                } else {
                    Err(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        "Client already taken",
                    ))
                }
            }
        }))
        .await?;

    Ok(TreeClient::from_channel(channel))
}
