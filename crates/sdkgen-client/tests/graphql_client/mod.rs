pub mod client;
pub mod get_node;

pub use self::client::Client;
pub use self::get_node::{GET_NODE_OPERATION, GetNode, GetNodeNode, GetNodeNodeNode, GetNodeNodeUser};
pub use sdkgen_client::{BaseClient, ClientError, Maybe};

/// Every public name of this package, sorted.
pub const EXPORTS: &[&str] = &[
    "BaseClient",
    "Client",
    "ClientError",
    "GET_NODE_OPERATION",
    "GetNode",
    "GetNodeNode",
    "GetNodeNodeNode",
    "GetNodeNodeUser",
    "Maybe",
];
