//! HTTP implementations of the backend traits.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, error, instrument};
use viacep_client::{ViaCepClient, ViaCepError};

use crate::config::Config;
use crate::error::{CadastroError, Result};
use crate::traits::{BaseAddressRepository, BaseIdentityVerifier, BasePostalLookup};
use crate::types::{Address, Member, ResolvedAddress, SaveAddressRequest};

fn with_timeout(req: RequestBuilder, timeout: Option<Duration>) -> RequestBuilder {
    match timeout {
        Some(t) => req.timeout(t),
        None => req,
    }
}

async fn api_error(resp: Response) -> CadastroError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    CadastroError::Api {
        status: status.as_u16(),
        message: body,
    }
}

// =============================================================================
// Census backend (identity)
// =============================================================================

#[derive(Debug, Clone)]
pub struct CensoClient {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl CensoClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.censo_api_url.clone()).with_timeout(config.http_timeout)
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn verify_url(&self, identity: &str) -> String {
        format!("{}/membro/{}/verificar", self.base_url, identity)
    }
}

#[async_trait]
impl BaseIdentityVerifier for CensoClient {
    #[instrument(skip(self))]
    async fn verify(&self, identity: &str) -> Result<Member> {
        let url = self.verify_url(identity);
        let resp = with_timeout(self.client.get(&url), self.timeout)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Identity verification request failed");
                CadastroError::Network(e)
            })?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(CadastroError::MemberNotFound(identity.to_string()));
        }
        if !resp.status().is_success() {
            let err = api_error(resp).await;
            error!(error = %err, "Identity backend returned an error");
            return Err(err);
        }

        let member: Member = resp.json().await?;
        debug!(matricula = %member.matricula, "Member verified");
        Ok(member)
    }
}

// =============================================================================
// Address backend (persistence)
// =============================================================================

#[derive(Debug, Clone)]
pub struct EnderecoClient {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl EnderecoClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.endereco_api_url.clone()).with_timeout(config.http_timeout)
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn save_url(&self) -> String {
        format!("{}/enderecos", self.base_url)
    }
}

#[async_trait]
impl BaseAddressRepository for EnderecoClient {
    #[instrument(skip(self, address))]
    async fn save(&self, matricula: &str, address: &Address) -> Result<()> {
        let body = SaveAddressRequest {
            matricula,
            endereco: address,
        };

        let resp = with_timeout(self.client.post(self.save_url()).json(&body), self.timeout)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Address save request failed");
                CadastroError::Network(e)
            })?;

        if !resp.status().is_success() {
            let err = api_error(resp).await;
            error!(error = %err, "Address backend rejected save");
            return Err(err);
        }

        Ok(())
    }
}

// =============================================================================
// ViaCEP (postal lookup)
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct ViaCepLookup {
    client: ViaCepClient,
}

impl ViaCepLookup {
    pub fn new(client: ViaCepClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(ViaCepClient::new().with_timeout(config.http_timeout))
    }

    pub fn with_client(self, client: Client) -> Self {
        Self::new(self.client.with_client(client))
    }
}

#[async_trait]
impl BasePostalLookup for ViaCepLookup {
    async fn lookup(&self, postal_code: &str) -> Result<Option<ResolvedAddress>> {
        match self.client.lookup(postal_code).await {
            Ok(found) => Ok(Some(ResolvedAddress {
                street: found.logradouro,
                neighborhood: found.bairro,
                city: found.localidade,
                region: found.uf,
            })),
            Err(ViaCepError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
