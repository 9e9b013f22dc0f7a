use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};

use super::FakecloudError;
use super::types::{ApiErrorBody, VirtualMachine, VmRequest};

const USER_AGENT: &str = concat!("terraform-provider-fakecloud/", env!("CARGO_PKG_VERSION"));

/// Operations the provider needs from the fakecloud service.
#[async_trait]
pub trait FakecloudApi: Send + Sync {
    async fn create_vm(&self, vm: &VirtualMachine) -> Result<VirtualMachine, FakecloudError>;
    async fn get_vm(&self, id: i64) -> Result<VirtualMachine, FakecloudError>;
    async fn get_vms(&self) -> Result<Vec<VirtualMachine>, FakecloudError>;
    async fn update_vm(
        &self,
        id: i64,
        name: &str,
        instance_type: &str,
    ) -> Result<(), FakecloudError>;
    async fn delete_vm(&self, id: i64) -> Result<(), FakecloudError>;
}

#[derive(Clone)]
pub struct FakecloudClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl FakecloudClient {
    pub fn new(host: &str, username: &str, password: &str) -> Result<Self, FakecloudError> {
        let trimmed = host.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(FakecloudError::InvalidHost {
                host: host.to_string(),
                message: "host must not be empty".to_string(),
            });
        }

        let url = Url::parse(trimmed).map_err(|e| FakecloudError::InvalidHost {
            host: host.to_string(),
            message: e.to_string(),
        })?;

        // "localhost:8080" parses with "localhost" as the scheme.
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FakecloudError::InvalidHost {
                host: host.to_string(),
                message: format!(
                    "unsupported scheme \"{}\", expected http:// or https://",
                    url.scheme()
                ),
            });
        }

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(FakecloudError::Network)?;

        Ok(Self {
            client,
            base_url: trimmed.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    pub fn host(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url);

        // NOTE: Unauthenticated fakecloud deployments accept requests without credentials
        if self.username.is_empty() {
            builder
        } else {
            builder.basic_auth(&self.username, Some(&self.password))
        }
    }

    async fn send(
        &self,
        builder: RequestBuilder,
        id: Option<i64>,
    ) -> Result<Response, FakecloudError> {
        let response = builder.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            if let Some(id) = id {
                return Err(FakecloudError::NotFound { id });
            }
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .ok()
            .and_then(ApiErrorBody::into_message)
            .unwrap_or_else(|| {
                if text.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                } else {
                    text.trim().to_string()
                }
            });

        Err(FakecloudError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: Response,
    ) -> Result<T, FakecloudError> {
        response.json().await.map_err(|e| FakecloudError::Decode {
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl FakecloudApi for FakecloudClient {
    async fn create_vm(&self, vm: &VirtualMachine) -> Result<VirtualMachine, FakecloudError> {
        let body = VmRequest {
            name: &vm.name,
            instance_type: &vm.instance_type,
        };
        let builder = self.request(Method::POST, "/vms").json(&body);
        let response = self.send(builder, None).await?;
        let created: VirtualMachine = Self::decode(response).await?;

        tracing::debug!(id = created.id, name = %created.name, "fakecloud VM created");
        Ok(created)
    }

    async fn get_vm(&self, id: i64) -> Result<VirtualMachine, FakecloudError> {
        let builder = self.request(Method::GET, &format!("/vms/{}", id));
        let response = self.send(builder, Some(id)).await?;
        Self::decode(response).await
    }

    async fn get_vms(&self) -> Result<Vec<VirtualMachine>, FakecloudError> {
        let builder = self.request(Method::GET, "/vms");
        let response = self.send(builder, None).await?;
        let vms: Vec<VirtualMachine> = Self::decode(response).await?;

        tracing::debug!(count = vms.len(), "fakecloud VMs listed");
        Ok(vms)
    }

    async fn update_vm(
        &self,
        id: i64,
        name: &str,
        instance_type: &str,
    ) -> Result<(), FakecloudError> {
        let body = VmRequest {
            name,
            instance_type,
        };
        let builder = self
            .request(Method::PUT, &format!("/vms/{}", id))
            .json(&body);
        self.send(builder, Some(id)).await?;
        Ok(())
    }

    async fn delete_vm(&self, id: i64) -> Result<(), FakecloudError> {
        let builder = self.request(Method::DELETE, &format!("/vms/{}", id));
        self.send(builder, Some(id)).await?;
        Ok(())
    }
}

impl std::fmt::Debug for FakecloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakecloudClient")
            .field("host", &self.base_url)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = FakecloudClient::new("http://localhost:8080", "admin", "secret");
        assert!(client.is_ok());
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = FakecloudClient::new("http://localhost:8080/", "", "").unwrap();
        assert_eq!(client.host(), "http://localhost:8080");
    }

    #[test]
    fn test_empty_host_rejected() {
        let result = FakecloudClient::new("   ", "admin", "secret");
        assert!(matches!(result, Err(FakecloudError::InvalidHost { .. })));
    }

    #[test]
    fn test_unparsable_host_rejected() {
        let result = FakecloudClient::new("localhost without scheme", "admin", "secret");
        assert!(matches!(result, Err(FakecloudError::InvalidHost { .. })));
    }

    #[test]
    fn test_host_without_http_scheme_rejected() {
        for host in ["localhost:8080", "ftp://localhost", "unix:/var/run/fakecloud.sock"] {
            let result = FakecloudClient::new(host, "", "");
            match result {
                Err(FakecloudError::InvalidHost { message, .. }) => {
                    assert!(message.contains("unsupported scheme"), "{}: {}", host, message);
                }
                other => panic!("Expected InvalidHost for {}, got {:?}", host, other),
            }
        }
    }

    #[test]
    fn test_https_host_accepted() {
        assert!(FakecloudClient::new("https://fakecloud.example.com/", "", "").is_ok());
    }

    #[test]
    fn test_debug_does_not_expose_password() {
        let client =
            FakecloudClient::new("http://localhost:8080", "admin", "super_secret_pw_12345")
                .unwrap();
        let debug_output = format!("{:?}", client);

        assert!(
            debug_output.contains("[REDACTED]"),
            "Debug output should contain [REDACTED]"
        );
        assert!(
            !debug_output.contains("super_secret_pw_12345"),
            "Debug output must NOT contain the actual password"
        );
    }

    #[test]
    fn test_client_is_clone() {
        let client = FakecloudClient::new("http://localhost:8080", "", "").unwrap();
        let _cloned = client.clone();
    }
}
