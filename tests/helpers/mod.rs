//! An in-memory tree service to run the client against.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use tonic::{Request, Response, Status};
use treecli::proto::tree_server::Tree;
use treecli::proto::{
    CreateRequest, CreateResponse, DeleteRequest, DeleteResponse, DeleteTreeRequest,
    DeleteTreeResponse, ForceTreeDeleteRequest, ForceTreeDeleteResponse, InsertRequest,
    InsertResponse, Pair, SearchRequest, SearchResponse, TraverseRequest, TraverseResponse,
};
use treecli::{transitive, RpcResponse, TreeClient};

pub(crate) const OK: i32 = 200;
pub(crate) const CREATED: i32 = 201;
pub(crate) const NOT_FOUND: i32 = 404;
pub(crate) const CONFLICT: i32 = 409;

#[derive(Debug)]
struct StoredTree {
    token: String,
    max_leaf_size: i32,
    pairs: BTreeMap<i32, String>,
    deletion_requested: bool,
}

#[derive(Debug, Default)]
struct State {
    next_id: i32,
    trees: HashMap<i32, StoredTree>,
}

/// A tree service that keeps every tree in a single map.
#[derive(Debug, Default)]
pub(crate) struct MemoryTree {
    state: Mutex<State>,
}

impl MemoryTree {
    /// Run `f` on the tree named by `id` once `token` has been checked.
    fn with_tree<T>(
        &self,
        id: i32,
        token: &str,
        f: impl FnOnce(&mut StoredTree) -> T,
    ) -> Result<T, Status> {
        let mut state = self.state.lock().expect("state lock poisoned");
        let tree = state
            .trees
            .get_mut(&id)
            .ok_or_else(|| Status::not_found(format!("no tree with id {id}")))?;
        if tree.token != token {
            return Err(Status::permission_denied(format!(
                "invalid token for tree {id}"
            )));
        }
        Ok(f(tree))
    }
}

#[tonic::async_trait]
impl Tree for MemoryTree {
    async fn create(&self, request: Request<CreateRequest>) -> RpcResponse<CreateResponse> {
        let CreateRequest { max_leaf_size } = request.into_inner();
        if max_leaf_size < 1 {
            return Err(Status::invalid_argument("leaves must hold at least one pair"));
        }

        let mut state = self.state.lock().expect("state lock poisoned");
        let id = state.next_id;
        state.next_id += 1;
        let token = format!("token-{id}");
        state.trees.insert(
            id,
            StoredTree {
                token: token.clone(),
                max_leaf_size,
                pairs: BTreeMap::new(),
                deletion_requested: false,
            },
        );
        Ok(Response::new(CreateResponse { id, token }))
    }

    async fn insert(&self, request: Request<InsertRequest>) -> RpcResponse<InsertResponse> {
        let InsertRequest {
            id,
            token,
            key,
            value,
        } = request.into_inner();
        let response = self.with_tree(id, &token, |tree| {
            if tree.pairs.contains_key(&key) {
                InsertResponse {
                    code: CONFLICT,
                    result: format!("key {key} already exists"),
                }
            } else {
                tree.pairs.insert(key, value);
                InsertResponse {
                    code: CREATED,
                    result: format!("inserted key {key}"),
                }
            }
        })?;
        Ok(Response::new(response))
    }

    async fn search(&self, request: Request<SearchRequest>) -> RpcResponse<SearchResponse> {
        let SearchRequest { id, token, key } = request.into_inner();
        let response = self.with_tree(id, &token, |tree| match tree.pairs.get(&key) {
            Some(value) => SearchResponse {
                code: OK,
                value: value.clone(),
            },
            None => SearchResponse {
                code: NOT_FOUND,
                value: String::new(),
            },
        })?;
        Ok(Response::new(response))
    }

    async fn delete(&self, request: Request<DeleteRequest>) -> RpcResponse<DeleteResponse> {
        let DeleteRequest { id, token, key } = request.into_inner();
        let response = self.with_tree(id, &token, |tree| match tree.pairs.remove(&key) {
            Some(_) => DeleteResponse {
                code: OK,
                result: format!("deleted key {key}"),
            },
            None => DeleteResponse {
                code: NOT_FOUND,
                result: format!("key {key} not found"),
            },
        })?;
        Ok(Response::new(response))
    }

    async fn delete_tree(
        &self,
        request: Request<DeleteTreeRequest>,
    ) -> RpcResponse<DeleteTreeResponse> {
        let DeleteTreeRequest { id, token } = request.into_inner();
        self.with_tree(id, &token, |tree| tree.deletion_requested = true)?;
        Ok(Response::new(DeleteTreeResponse {
            code: OK,
            message: "confirm with forceTreeDelete".to_owned(),
        }))
    }

    async fn force_tree_delete(
        &self,
        request: Request<ForceTreeDeleteRequest>,
    ) -> RpcResponse<ForceTreeDeleteResponse> {
        let ForceTreeDeleteRequest { id, token } = request.into_inner();
        self.with_tree(id, &token, |_| ())?;
        let _removed = self
            .state
            .lock()
            .expect("state lock poisoned")
            .trees
            .remove(&id);
        Ok(Response::new(ForceTreeDeleteResponse {
            code: OK,
            message: format!("tree {id} is gone"),
        }))
    }

    async fn traverse(&self, request: Request<TraverseRequest>) -> RpcResponse<TraverseResponse> {
        let TraverseRequest { id, token } = request.into_inner();
        let pairs = self.with_tree(id, &token, |tree| {
            tree.pairs
                .iter()
                .map(|(&key, value)| Pair {
                    key,
                    value: value.clone(),
                })
                .collect::<Vec<_>>()
        })?;
        Ok(Response::new(TraverseResponse {
            code: OK,
            result: format!("{} pairs", pairs.len()),
            pairs,
        }))
    }
}

/// A client connected to a fresh, empty in-memory service.
pub(crate) async fn client() -> Result<TreeClient, tonic::transport::Error> {
    transitive::tree_client(MemoryTree::default()).await
}
