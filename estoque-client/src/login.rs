//! Login gate
//!
//! The login form must stay disabled until the backend finished its
//! startup configuration (user database bootstrap). The gate encodes that
//! ordering in its type: only a `LoginGate<Ready>` can submit credentials.

use std::fmt::Debug;
use std::future::Future;
use std::marker::PhantomData;

use crate::ClientResult;
use crate::api::InventoryApi;
use crate::gateway::Gateway;

/// Message shown in the blocking alert on rejected credentials
pub const INVALID_CREDENTIALS: &str = "Usuário ou senha inválidos";

/// Startup handshake not finished yet; submission disabled.
#[derive(Debug, Clone, Copy)]
pub struct AwaitingConfig;

/// Handshake done; credentials may be submitted.
#[derive(Debug, Clone, Copy)]
pub struct Ready;

/// Sealed trait for gate states.
pub trait GateState: private::Sealed + Send + Sync + 'static {}
impl GateState for AwaitingConfig {}
impl GateState for Ready {}

mod private {
    pub trait Sealed {}
    impl Sealed for super::AwaitingConfig {}
    impl Sealed for super::Ready {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Accepted,
    Rejected { message: String },
}

impl LoginOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, LoginOutcome::Accepted)
    }
}

pub struct LoginGate<'a, G: Gateway, S: GateState = AwaitingConfig> {
    api: &'a InventoryApi<G>,
    _state: PhantomData<S>,
}

impl<'a, G: Gateway> LoginGate<'a, G, AwaitingConfig> {
    pub fn new(api: &'a InventoryApi<G>) -> Self {
        Self {
            api,
            _state: PhantomData,
        }
    }

    /// Await the backend handshake, then enable submission.
    ///
    /// A failed handshake keeps the gate closed and returns the error.
    pub async fn ready<F, T>(self, handshake: F) -> ClientResult<LoginGate<'a, G, Ready>>
    where
        F: Future<Output = ClientResult<T>>,
        T: Debug,
    {
        let outcome = handshake.await?;
        tracing::info!(?outcome, "backend configured, login enabled");
        Ok(LoginGate {
            api: self.api,
            _state: PhantomData,
        })
    }
}

impl<G: Gateway> LoginGate<'_, G, Ready> {
    pub async fn submit(&self, name: &str, password: &str) -> ClientResult<LoginOutcome> {
        tracing::debug!(user = name, "verifying credentials");
        let response = self.api.verify(name, password).await?;

        if response.is_truthy() {
            tracing::info!(user = name, "login accepted");
            Ok(LoginOutcome::Accepted)
        } else {
            tracing::info!(user = name, "login rejected");
            Ok(LoginOutcome::Rejected {
                message: INVALID_CREDENTIALS.to_string(),
            })
        }
    }
}
