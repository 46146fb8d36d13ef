use sdkgen_client::{Branch, ClientError, Fallback, Variables, decode, pick_branch};
use serde::Deserialize;

pub const GET_NODE_OPERATION: &str = r"query getNode($id: ID!) {
  node(id: $id) {
    __typename
    id
    ... on User {
      name
    }
  }
}
";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetNode {
    pub node: Option<GetNodeNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GetNodeNode {
    User(GetNodeNodeUser),
    Node(GetNodeNodeNode),
}

impl<'de> Deserialize<'de> for GetNodeNode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        const BRANCHES: &[Branch] = &[
            Branch::new("User", &["__typename", "id", "name"]),
        ];
        const FALLBACK: Fallback = Fallback::new(&["Post"], &["__typename", "id"]);

        let mut value = serde_json::Value::deserialize(deserializer)?;
        let picked = pick_branch(&mut value, Some("__typename"), BRANCHES, &FALLBACK)
            .map_err(serde::de::Error::custom)?;
        let decoded = match picked {
            Some(0) => serde_json::from_value(value).map(Self::User),
            _ => serde_json::from_value(value).map(Self::Node),
        };
        decoded.map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetNodeNodeUser {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GetNodeNodeNode {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub id: String,
}

impl super::client::Client {
    pub async fn get_node(&self, id: String) -> Result<GetNode, ClientError> {
        let variables = Variables::new()
            .with("id", id);
        let response = self.base.execute(GET_NODE_OPERATION, variables).await?;
        let data = self.base.get_data(response)?;
        decode(data)
    }
}
