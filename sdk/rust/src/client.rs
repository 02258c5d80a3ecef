use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("server closed the connection")]
    Disconnected,

    /// The server answered with `status: "error"`.
    #[error("{message}")]
    Server {
        code: Option<String>,
        message: String,
    },

    #[error("response is missing field `{0}`")]
    MissingField(&'static str),
}

/// One decoded server reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Every other field of the reply (the action payload).
    #[serde(flatten)]
    pub body: Map<String, Value>,
}

impl ShopResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    /// Convert an error reply into `SdkError::Server`.
    pub fn into_result(self) -> Result<Self, SdkError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(SdkError::Server {
                code: self.code,
                message: self.message.unwrap_or_default(),
            })
        }
    }

    /// Take one payload field out of a success reply.
    pub fn take(mut self, field: &'static str) -> Result<Value, SdkError> {
        self.body.remove(field).ok_or(SdkError::MissingField(field))
    }
}

/// A persistent connection to a shop server.
///
/// Requests are sent one at a time; each call waits for its reply.
pub struct ShopClient {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
    line: String,
}

impl ShopClient {
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self, SdkError> {
        let stream = TcpStream::connect(addr).await?;
        stream.set_nodelay(true)?;
        let (read, write) = stream.into_split();

        Ok(Self {
            reader: BufReader::new(read),
            writer: write,
            line: String::new(),
        })
    }

    /// Send a raw request document and read back the reply, whatever its status.
    pub async fn send(&mut self, request: &Value) -> Result<ShopResponse, SdkError> {
        let mut bytes = serde_json::to_vec(request)?;
        bytes.push(b'\n');
        self.send_bytes(&bytes).await
    }

    /// Write arbitrary bytes and read one reply line.
    pub async fn send_bytes(&mut self, bytes: &[u8]) -> Result<ShopResponse, SdkError> {
        self.writer.write_all(bytes).await?;
        self.writer.flush().await?;
        self.read_response().await
    }

    async fn read_response(&mut self) -> Result<ShopResponse, SdkError> {
        self.line.clear();
        if self.reader.read_line(&mut self.line).await? == 0 {
            return Err(SdkError::Disconnected);
        }
        Ok(serde_json::from_str(self.line.trim_end())?)
    }

    async fn call(&mut self, request: Value, field: &'static str) -> Result<Value, SdkError> {
        self.send(&request).await?.into_result()?.take(field)
    }

    /// Mapping of product id to product.
    pub async fn get_products(&mut self) -> Result<Value, SdkError> {
        self.call(json!({"action": "get_products"}), "products").await
    }

    pub async fn get_product(&mut self, product_id: &str) -> Result<Value, SdkError> {
        self.call(
            json!({"action": "get_product", "product_id": product_id}),
            "product",
        )
        .await
    }

    /// Create an empty cart and return its id.
    pub async fn create_cart(&mut self) -> Result<String, SdkError> {
        let cart_id = self.call(json!({"action": "create_cart"}), "cart_id").await?;
        cart_id
            .as_str()
            .map(str::to_string)
            .ok_or(SdkError::MissingField("cart_id"))
    }

    /// Add `quantity` units and return the updated cart.
    pub async fn add_to_cart(
        &mut self,
        cart_id: &str,
        product_id: &str,
        quantity: u32,
    ) -> Result<Value, SdkError> {
        self.call(
            json!({
                "action": "add_to_cart",
                "cart_id": cart_id,
                "product_id": product_id,
                "quantity": quantity,
            }),
            "cart",
        )
        .await
    }

    pub async fn get_cart(&mut self, cart_id: &str) -> Result<Value, SdkError> {
        self.call(json!({"action": "get_cart", "cart_id": cart_id}), "cart")
            .await
    }

    /// Check the cart out and return the created order.
    pub async fn checkout(&mut self, cart_id: &str) -> Result<Value, SdkError> {
        self.call(json!({"action": "checkout", "cart_id": cart_id}), "order")
            .await
    }

    /// Mapping of order id to order.
    pub async fn get_orders(&mut self) -> Result<Value, SdkError> {
        self.call(json!({"action": "get_orders"}), "orders").await
    }
}
