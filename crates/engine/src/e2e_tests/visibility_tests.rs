//! Private entity visibility across users.

use jsonhub_domain::{EntityInput, EntityPatch, FilterCriteria, UserId};

use super::E2EContext;
use crate::use_cases::RegistryError;

#[tokio::test]
async fn private_entities_are_hidden_from_others() {
    let ctx = E2EContext::new().await;
    let owner = ctx.owner;
    let other = UserId::new();

    let secret = ctx
        .add_entity(EntityInput::new(owner, ctx.root.clone(), "{}").with_private(true))
        .await;
    ctx.add_entity(EntityInput::new(owner, ctx.root.clone(), "{}"))
        .await;

    assert!(ctx
        .app
        .entities
        .get_entity(secret.id(), Some(owner))
        .await
        .unwrap()
        .is_some());
    let result = ctx.app.entities.get_entity(secret.id(), Some(other)).await;
    assert!(result.unwrap_err().is_forbidden());

    // Unscoped listings only show public entities, even to the owner
    let all = FilterCriteria::default();
    assert_eq!(ctx.app.entities.count_entities(&all, None).await.unwrap(), 1);
    assert_eq!(
        ctx.app.entities.count_entities(&all, Some(owner)).await.unwrap(),
        1
    );

    let mine = FilterCriteria::builder().owner(owner).build().unwrap();
    assert_eq!(
        ctx.app.entities.count_entities(&mine, Some(owner)).await.unwrap(),
        2
    );
    let result = ctx.app.entities.count_entities(&mine, Some(other)).await;
    assert!(matches!(result, Err(RegistryError::ForbiddenFilter(_))));
}

#[tokio::test]
async fn publishing_an_entity_makes_it_listable() {
    let ctx = E2EContext::new().await;
    let owner = ctx.owner;

    let draft = ctx
        .add_entity(EntityInput::new(owner, ctx.root.clone(), "{}").with_private(true))
        .await;
    let all = FilterCriteria::default();
    assert!(ctx.app.entities.get_entities(&all, None).await.unwrap().is_empty());

    ctx.app
        .entities
        .update_entity(
            owner,
            draft.id(),
            EntityPatch {
                private: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let listed = ctx.app.entities.get_entities(&all, None).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id(), draft.id());
}
