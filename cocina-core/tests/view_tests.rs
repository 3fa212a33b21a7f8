//! The catalog, category detail, management surface and session flows
//! driven end to end over the in-memory store.

use cocina_core::{
    CatalogView, CategoryDetailView, Destination, FakeIdentityProvider, FormAction, FormMode,
    GetRecipesUseCase, History, LoginView, ManagementSurface, MemoryStore, Notice, ProfileView,
    RecipeCardsView, RecipeFields, RecipeRepository, Session, SessionRouter, SignInProvider,
    SurfaceError, UserIdentity, ViewState, UNCATEGORIZED,
};
use std::sync::Arc;

fn fields(name: &str, category: &str) -> RecipeFields {
    RecipeFields {
        name: name.to_string(),
        ingredients: vec!["sal".to_string()],
        category: category.to_string(),
        instructions: "Cocinar".to_string(),
        image_url: None,
    }
}

fn seeded() -> (Arc<MemoryStore>, RecipeRepository) {
    let store = Arc::new(MemoryStore::with_documents(vec![
        fields("Flan", "A"),
        fields("Natillas", "A"),
        fields("Caldo", "B"),
    ]));
    let repo = RecipeRepository::new(store.clone());
    (store, repo)
}

#[tokio::test]
async fn catalog_derives_categories_and_navigates() {
    let (_, repo) = seeded();
    let mut catalog = CatalogView::new();
    assert_eq!(catalog.state(), &ViewState::Loading);

    catalog.load(&repo).await;
    assert_eq!(
        catalog.state(),
        &ViewState::Ready(vec!["A".to_string(), "B".to_string()])
    );

    let mut history = History::new();
    assert!(catalog.select(1, &mut history));
    assert_eq!(
        history.current(),
        Some(&Destination::CategoryDetail {
            category: "B".to_string()
        })
    );
    assert!(!catalog.select(2, &mut history));
}

#[tokio::test]
async fn catalog_store_side_categories_match_client_side() {
    let (_, repo) = seeded();
    let mut derived = CatalogView::new();
    derived.load(&repo).await;
    let mut distinct = CatalogView::new();
    distinct.load_distinct(&repo).await;
    assert_eq!(derived.state(), distinct.state());
}

#[tokio::test]
async fn catalog_failure_is_shown_not_stuck() {
    let (store, repo) = seeded();
    store.fail_reads(true);

    let mut catalog = CatalogView::new();
    catalog.load(&repo).await;
    assert!(matches!(catalog.state(), ViewState::Failed(message) if message.contains("unavailable")));
}

#[tokio::test]
async fn category_detail_filters_both_ways() {
    let (_, repo) = seeded();

    let mut detail = CategoryDetailView::new(Some("B"));
    detail.load(&repo).await;
    let cards = detail.state().ready().unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].name, "Caldo");

    let mut filtered = CategoryDetailView::new(Some("A"));
    filtered.load_filtered(&repo).await;
    let names: Vec<_> = filtered
        .state()
        .ready()
        .unwrap()
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["Flan", "Natillas"]);
}

#[tokio::test]
async fn empty_category_tile_opens_its_recipes() {
    let store = Arc::new(MemoryStore::with_documents(vec![
        fields("Pan", ""),
        fields("Caldo", "B"),
    ]));
    let repo = RecipeRepository::new(store);

    let mut catalog = CatalogView::new();
    catalog.load(&repo).await;
    assert_eq!(
        catalog.state(),
        &ViewState::Ready(vec![String::new(), "B".to_string()])
    );

    let mut history = History::new();
    assert!(catalog.select(0, &mut history));
    let Some(Destination::CategoryDetail { category }) = history.current() else {
        panic!("expected category detail, got {:?}", history.current());
    };

    let mut detail = CategoryDetailView::new(Some(category.as_str()));
    assert_eq!(detail.category(), UNCATEGORIZED);
    detail.load(&repo).await;
    let cards = detail.state().ready().unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].name, "Pan");

    let mut filtered = CategoryDetailView::new(Some(category.as_str()));
    filtered.load_filtered(&repo).await;
    assert_eq!(filtered.state().ready().map(Vec::len), Some(1));
}

#[tokio::test]
async fn detail_without_category_shows_nothing() {
    let (_, repo) = seeded();
    let mut detail = CategoryDetailView::new(None);
    detail.load(&repo).await;
    assert_eq!(detail.state(), &ViewState::Ready(Vec::new()));
}

#[tokio::test]
async fn recipe_cards_list_everything() {
    let (_, repo) = seeded();
    let mut cards = RecipeCardsView::new();
    cards.load(&GetRecipesUseCase::new(repo)).await;
    assert_eq!(cards.state().ready().map(Vec::len), Some(3));
}

#[tokio::test]
async fn management_create_update_delete_cycle() {
    let (_, repo) = seeded();
    let mut surface = ManagementSurface::new(repo);
    surface.refresh().await.unwrap();
    assert_eq!(surface.recipes().len(), 3);

    // Create from an idle form.
    {
        let form = surface.form_mut();
        form.name = "Tarta".to_string();
        form.instructions = "Mezclar y hornear".to_string();
        form.category = "Postres".to_string();
        form.add_ingredient();
        form.set_ingredient(0, "harina");
        form.add_ingredient();
        form.set_ingredient(1, "huevo");
    }
    surface.create().await.unwrap();
    assert_eq!(surface.form().mode(), &FormMode::Idle);
    assert!(surface.form().name.is_empty());
    assert_eq!(surface.recipes().len(), 4);
    assert!(matches!(surface.notice(), Some(Notice::Info(_))));

    let id = surface
        .recipes()
        .iter()
        .find(|r| r.name == "Tarta")
        .map(|r| r.id.clone())
        .unwrap();

    // Select and update.
    surface.select(&id).unwrap();
    assert_eq!(surface.form().available_actions(), [FormAction::Update, FormAction::Delete]);
    surface.form_mut().add_ingredient();
    surface.form_mut().set_ingredient(2, "azúcar");
    surface.update().await.unwrap();
    assert_eq!(surface.form().mode(), &FormMode::Idle);
    let tarta = surface.recipes().iter().find(|r| r.id == id).unwrap();
    assert_eq!(tarta.ingredients, ["harina", "huevo", "azúcar"]);

    // Select and delete.
    surface.select(&id).unwrap();
    surface.delete().await.unwrap();
    assert!(surface.recipes().iter().all(|r| r.id != id));
    assert_eq!(surface.recipes().len(), 3);
}

#[tokio::test]
async fn selecting_another_recipe_replaces_form() {
    let (_, repo) = seeded();
    let mut surface = ManagementSurface::new(repo);
    surface.refresh().await.unwrap();
    let first = surface.recipes()[0].id.clone();
    let second = surface.recipes()[2].id.clone();

    surface.select(&first).unwrap();
    surface.form_mut().name = "edited but not saved".to_string();
    surface.select(&second).unwrap();

    assert_eq!(surface.form().selected_id(), Some(second.as_str()));
    assert_eq!(surface.form().name, "Caldo");
}

#[tokio::test]
async fn unavailable_actions_are_refused() {
    let (_, repo) = seeded();
    let mut surface = ManagementSurface::new(repo);

    assert!(matches!(
        surface.update().await,
        Err(SurfaceError::ActionUnavailable {
            action: FormAction::Update
        })
    ));

    surface.refresh().await.unwrap();
    let id = surface.recipes()[0].id.clone();
    surface.select(&id).unwrap();
    assert!(matches!(
        surface.create().await,
        Err(SurfaceError::ActionUnavailable { .. })
    ));
    assert!(matches!(
        surface.select("missing"),
        Err(SurfaceError::UnknownRecipe(_))
    ));
}

#[tokio::test]
async fn failed_create_keeps_form_and_reports() {
    let (store, repo) = seeded();
    let mut surface = ManagementSurface::new(repo);
    surface.refresh().await.unwrap();

    surface.form_mut().name = "Tarta".to_string();
    surface.form_mut().instructions = "Hornear".to_string();
    surface.form_mut().add_ingredient();
    surface.form_mut().set_ingredient(0, "harina");

    store.fail_writes(true);
    let result = surface.create().await;
    assert!(matches!(result, Err(SurfaceError::Repository(_))));
    assert!(matches!(surface.notice(), Some(Notice::Error(_))));
    assert!(!surface.is_loading());
    assert_eq!(surface.form().name, "Tarta");
    assert_eq!(surface.recipes().len(), 3);

    store.fail_writes(false);
    surface.create().await.unwrap();
    assert_eq!(surface.recipes().len(), 4);
}

#[tokio::test]
async fn stored_create_with_failed_reload_is_not_a_failure() {
    let (store, repo) = seeded();
    let mut surface = ManagementSurface::new(repo);
    surface.refresh().await.unwrap();

    surface.form_mut().name = "Tarta".to_string();
    surface.form_mut().instructions = "Hornear".to_string();
    surface.form_mut().add_ingredient();
    surface.form_mut().set_ingredient(0, "harina");

    store.fail_reads(true);
    surface.create().await.unwrap();

    assert_eq!(store.len(), 4);
    assert!(!surface.is_loading());
    assert_eq!(surface.form().mode(), &FormMode::Idle);
    assert!(surface.form().name.is_empty());
    assert!(matches!(
        surface.notice(),
        Some(Notice::Warning(message)) if message.contains("created") && message.contains("could not be reloaded")
    ));
    // The previous list stays until a reload succeeds.
    assert_eq!(surface.recipes().len(), 3);

    store.fail_reads(false);
    surface.refresh().await.unwrap();
    assert_eq!(surface.recipes().len(), 4);
}

#[tokio::test]
async fn stored_delete_with_failed_reload_is_not_a_failure() {
    let (store, repo) = seeded();
    let mut surface = ManagementSurface::new(repo);
    surface.refresh().await.unwrap();
    let id = surface.recipes()[0].id.clone();
    surface.select(&id).unwrap();

    store.fail_reads(true);
    surface.delete().await.unwrap();
    assert_eq!(store.len(), 2);
    assert!(matches!(surface.notice(), Some(Notice::Warning(_))));
}

#[tokio::test]
async fn invalid_form_is_rejected_before_store() {
    let (store, repo) = seeded();
    let mut surface = ManagementSurface::new(repo);

    surface.form_mut().name = "Sin ingredientes".to_string();
    surface.form_mut().instructions = "Nada".to_string();
    let result = surface.create().await;
    assert!(matches!(result, Err(SurfaceError::Repository(_))));
    assert_eq!(store.len(), 3);
}

fn ana() -> UserIdentity {
    UserIdentity {
        uid: "u-ana".to_string(),
        email: Some("ana@example.com".to_string()),
        display_name: Some("Ana".to_string()),
        photo_url: None,
    }
}

#[tokio::test]
async fn session_router_follows_transitions() {
    let mut provider = FakeIdentityProvider::new();
    provider.accept(SignInProvider::Google, "google-id-token", ana());
    let session = Session::new(Box::new(provider));

    let mut history = History::new();
    let mut router = SessionRouter::new(session.subscribe());
    router.route_now(&mut history);
    assert_eq!(history.current(), Some(&Destination::Login));

    let mut login = LoginView::new();
    let failed = login
        .sign_in(&session, SignInProvider::Facebook, "google-id-token", &mut history)
        .await;
    assert!(failed.is_err());
    assert!(login.error().is_some());

    let user = login
        .sign_in(&session, SignInProvider::Google, "google-id-token", &mut history)
        .await
        .unwrap();
    assert_eq!(history.current(), Some(&Destination::Profile));
    assert!(router.follow_next(&mut history).await);
    assert_eq!(history.current(), Some(&Destination::Profile));

    let mut profile = ProfileView::new(Some(&user));
    assert_eq!(profile.display_name, "Ana");
    profile.manage_recipes(&mut history);
    assert_eq!(history.current(), Some(&Destination::Manage));

    profile.log_out(&session, &mut history).await.unwrap();
    assert_eq!(history.current(), Some(&Destination::Login));
    assert!(router.follow_next(&mut history).await);
    assert_eq!(history.current(), Some(&Destination::Login));

    drop(router);
    assert_eq!(session.listener_count(), 0);
}

#[tokio::test]
async fn failed_logout_keeps_profile_and_reports() {
    let provider = FakeIdentityProvider::new().with_current_user(ana());
    provider.fail_sign_out(true);
    let session = Session::new(Box::new(provider));
    let user = session.restore().await.unwrap();
    assert_eq!(user.as_ref(), Some(&ana()));

    let mut history = History::new();
    let mut profile = ProfileView::new(user.as_ref());
    assert!(profile.log_out(&session, &mut history).await.is_err());
    assert!(profile.error().unwrap().starts_with("Error al cerrar sesión"));
    assert_eq!(profile.display_name, "Ana");
    assert!(history.visited().is_empty());
    assert_eq!(session.current(), Some(ana()));
}
