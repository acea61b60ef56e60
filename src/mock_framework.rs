//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_create`] or [`expect_list`] to assert behavior
//! and script the actor's reply.

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest, Response};
use tokio::sync::mpsc;

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// Client orchestration (checkout, seeding) is tested without spinning up a
/// `ResourceActor`. The mock client sends to a channel the test owns, the test
/// inspects each request as it arrives and answers through its responder. This
/// lets a test script success, rejection or a dropped actor deterministically.
pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, Response<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Response<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Patch, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, patch, respond_to }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Clear request
pub async fn expect_clear<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Response<usize>> {
    match receiver.recv().await {
        Some(ResourceRequest::Clear { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Seed request
pub async fn expect_seed<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Vec<T>, Response<bool>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Seed { items, respond_to }) => Some((items, respond_to)),
        _ => None,
    }
}

/// Answers a request as a missing entity would.
pub fn not_found<R>(respond_to: Response<R>, id: &str) {
    let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CartItem, MenuItem};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<CartItem>(10);

        // Test Create
        let create_task = tokio::spawn(async move {
            client.create(MenuItem::new("m1", "r1", "Masala Dosa", 120)).await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.name, "Masala Dosa");
        responder.send(Ok("m1".to_string())).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok("m1".to_string()));
    }

    #[tokio::test]
    async fn test_unexpected_request_yields_none() {
        let (client, mut receiver) = create_mock_client::<CartItem>(10);
        let task = tokio::spawn(async move { client.list().await });

        assert!(expect_get(&mut receiver).await.is_none());
        assert_eq!(task.await.unwrap(), Err(FrameworkError::ActorDropped));
    }
}
