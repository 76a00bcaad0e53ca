//! Upload + Feed Integration Tests
//!
//! The upload reads its policy/capability pair from the hand-off slot of its
//! feature family. An empty slot means nothing is selected yet: the upload
//! is a no-op, not an error, and no collaborator is contacted.
//!
//! Run with: cargo test --test upload_test -- --nocapture

mod common;

use std::time::Duration;

use common::TestEnvironment;
use gatehouse::{AccessStatus, FeatureFamily, PageView};
use gateway::UploadOutcome;

#[tokio::test]
async fn test_upload_with_empty_handoff_is_a_no_op() -> anyhow::Result<()> {
    // Arrange
    let env = TestEnvironment::new().await?;
    env.connect("0xALICE")?;
    let before = env.ledger.request_count();

    // Act
    let outcome = env
        .manager
        .upload(FeatureFamily::Allowlist, b"sealed bytes".to_vec())
        .await?;

    // Assert: nothing selected, nothing contacted.
    assert!(matches!(outcome, UploadOutcome::NothingSelected));
    assert_eq!(env.ledger.request_count(), before);
    Ok(())
}

#[tokio::test]
async fn test_upload_stores_blob_and_attaches_to_policy() -> anyhow::Result<()> {
    let env = TestEnvironment::new().await?;
    env.connect("0xALICE")?;
    let created = env.manager.create_allowlist("friends").await?;

    // Mounting the admin page fills the hand-off slot.
    env.manager
        .render_page(&format!(
            "/allowlist-example/admin/allowlist/{}",
            created.object_id
        ))
        .await?;

    let outcome = env
        .manager
        .upload(FeatureFamily::Allowlist, b"sealed bytes".to_vec())
        .await?;
    let UploadOutcome::Stored {
        blob_id,
        blob_url,
        policy_object,
    } = outcome
    else {
        panic!("expected stored outcome");
    };
    assert_eq!(policy_object, created.object_id);
    assert!(blob_url.ends_with(&blob_id));

    // The blob is now attached to the policy object on the ledger.
    let object = env.ledger.get_object(&created.object_id)?;
    assert_eq!(object.blobs, vec![blob_id]);
    Ok(())
}

#[tokio::test]
async fn test_uploads_use_their_own_familys_selection() -> anyhow::Result<()> {
    let env = TestEnvironment::new().await?;
    env.connect("0xALICE")?;

    let list = env.manager.create_allowlist("friends").await?;
    let service = env.manager.create_service("premium", 10, 60_000).await?;

    env.manager
        .render_page(&format!(
            "/allowlist-example/admin/allowlist/{}",
            list.object_id
        ))
        .await?;
    env.manager
        .render_page(&format!(
            "/subscription-example/admin/service/{}",
            service.object_id
        ))
        .await?;

    // A subscription upload lands on the service, never on the allowlist.
    let outcome = env
        .manager
        .upload(FeatureFamily::Subscription, b"episode one".to_vec())
        .await?;
    let UploadOutcome::Stored { policy_object, .. } = outcome else {
        panic!("expected stored outcome");
    };
    assert_eq!(policy_object, service.object_id);

    assert!(env.ledger.get_object(&list.object_id)?.blobs.is_empty());
    assert_eq!(env.ledger.get_object(&service.object_id)?.blobs.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_feed_lists_attached_blobs_for_members() -> anyhow::Result<()> {
    let env = TestEnvironment::new().await?;
    env.connect("0xALICE")?;
    let created = env.manager.create_allowlist("friends").await?;

    env.manager
        .render_page(&format!(
            "/allowlist-example/admin/allowlist/{}",
            created.object_id
        ))
        .await?;
    env.manager.add_member(&created.object_id, "0xBOB").await?;
    env.manager
        .upload(FeatureFamily::Allowlist, b"sealed bytes".to_vec())
        .await?;

    let path = format!("/allowlist-example/view/allowlist/{}", created.object_id);

    // A member sees the entries.
    env.manager.disconnect();
    env.connect("0xBOB")?;
    let view = env.manager.render_page(&path).await?;
    let PageView::Feed { feed, .. } = view else {
        panic!("expected feed page");
    };
    assert_eq!(feed.access, AccessStatus::Granted);
    assert_eq!(feed.entries.len(), 1);

    // A stranger sees the denial and no entries.
    env.manager.disconnect();
    env.connect("0xEVE")?;
    let PageView::Feed { feed, .. } = env.manager.render_page(&path).await? else {
        panic!("expected feed page");
    };
    assert_eq!(feed.access, AccessStatus::NotListed);
    assert!(feed.entries.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_subscription_feed_requires_active_token() -> anyhow::Result<()> {
    let env = TestEnvironment::new().await?;
    env.connect("0xALICE")?;
    let service = env.manager.create_service("premium", 10, 60_000).await?;
    let path = format!("/subscription-example/view/service/{}", service.object_id);

    // No token yet.
    env.manager.disconnect();
    env.connect("0xBOB")?;
    let PageView::Feed { feed, .. } = env.manager.render_page(&path).await? else {
        panic!("expected feed page");
    };
    assert_eq!(feed.access, AccessStatus::NoSubscription);

    // Subscribing grants access.
    env.manager.subscribe(&service.object_id).await?;
    let PageView::Feed { feed, .. } = env.manager.render_page(&path).await? else {
        panic!("expected feed page");
    };
    assert_eq!(feed.access, AccessStatus::Granted);
    Ok(())
}

#[tokio::test]
async fn test_expired_token_no_longer_grants_access() -> anyhow::Result<()> {
    let env = TestEnvironment::new().await?;
    env.connect("0xALICE")?;
    let service = env.manager.create_service("flash sale", 1, 1).await?;
    let path = format!("/subscription-example/view/service/{}", service.object_id);

    env.manager.disconnect();
    env.connect("0xBOB")?;
    env.manager.subscribe(&service.object_id).await?;

    // One millisecond of lifetime is over by the time we render.
    tokio::time::sleep(Duration::from_millis(20)).await;
    let PageView::Feed { feed, .. } = env.manager.render_page(&path).await? else {
        panic!("expected feed page");
    };
    assert_eq!(feed.access, AccessStatus::Expired);
    assert!(feed.entries.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_member_ops_need_the_admin_selection() -> anyhow::Result<()> {
    let env = TestEnvironment::new().await?;
    env.connect("0xALICE")?;
    let created = env.manager.create_allowlist("friends").await?;

    // Without the admin page mounted there is no capability to act with.
    let err = env
        .manager
        .add_member(&created.object_id, "0xBOB")
        .await
        .unwrap_err();
    assert!(matches!(err, gateway::GatewayError::NoAdminCap(_)));

    env.manager
        .render_page(&format!(
            "/allowlist-example/admin/allowlist/{}",
            created.object_id
        ))
        .await?;
    env.manager.add_member(&created.object_id, "0xBOB").await?;
    env.manager
        .remove_member(&created.object_id, "0xBOB")
        .await?;
    assert!(env
        .ledger
        .get_object(&created.object_id)?
        .members
        .is_empty());
    Ok(())
}
