//! Integration tests for order form persistence.
//!
//! Exercises the codec against a real database:
//! - NULL storage of unset choices
//! - Round trip of a fully filled form
//! - Draft-only update and delete guards
//! - Customer lookup-or-create by email
//! - Locked partial updates, including concurrent ones

use assert_matches::assert_matches;
use sqlx::PgPool;
use sugarloaf_core::error::CoreError;
use sugarloaf_core::form::{FormDraft, TreatQuantities};
use sugarloaf_db::codec::{from_storage, to_storage};
use sugarloaf_db::form_update::{delete_form, update_form};
use sugarloaf_db::models::customer::UpsertCustomer;
use sugarloaf_db::models::order_form::UpdateOrderForm;
use sugarloaf_db::repositories::{CustomerRepo, OrderFormRepo};
use sugarloaf_db::DbError;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn filled_form() -> FormDraft {
    let mut form = FormDraft::new(chrono::Utc::now());
    form.first_name = "Ada".into();
    form.last_name = "Lovelace".into();
    form.email = "ada@example.com".into();
    form.phone = "555-0100".into();
    form.communication_method = "email".into();
    form.package_type = "by-dozen".into();
    form.quantities = TreatQuantities {
        cake_pops: 1,
        cupcakes: 2,
        cookies: 3,
        pretzel_rods: 4,
    };
    form.color_scheme = "lavender".into();
    form.event_type = "baby shower".into();
    form.theme = "clouds".into();
    form.additional_designs = "tiny stars".into();
    form.selected_designs = vec!["stars-01".into()];
    form.pickup_date = "2026-11-14".into();
    form.pickup_time = "2:00 PM - 3:00 PM".into();
    form.referral_source = "friend".into();
    form.terms_accepted = true;
    form.visit_step("lead");
    form.visit_step("communication");
    form.current_step = 3;
    form
}

fn assert_same_fields(a: &FormDraft, b: &FormDraft) {
    assert_eq!(a.id, b.id);
    assert_eq!(a.first_name, b.first_name);
    assert_eq!(a.last_name, b.last_name);
    assert_eq!(a.email, b.email);
    assert_eq!(a.phone, b.phone);
    assert_eq!(a.communication_method, b.communication_method);
    assert_eq!(a.package_type, b.package_type);
    assert_eq!(a.quantities, b.quantities);
    assert_eq!(a.color_scheme, b.color_scheme);
    assert_eq!(a.event_type, b.event_type);
    assert_eq!(a.theme, b.theme);
    assert_eq!(a.additional_designs, b.additional_designs);
    assert_eq!(a.selected_designs, b.selected_designs);
    assert_eq!(a.pickup_date, b.pickup_date);
    assert_eq!(a.pickup_time, b.pickup_time);
    assert_eq!(a.rush_order, b.rush_order);
    assert_eq!(a.referral_source, b.referral_source);
    assert_eq!(a.terms_accepted, b.terms_accepted);
    assert_eq!(a.visited_steps, b.visited_steps);
    assert_eq!(a.current_step, b.current_step);
    assert_eq!(a.status, b.status);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_filled_form_round_trips_through_database(pool: PgPool) {
    let form = filled_form();
    let stored = OrderFormRepo::create(&pool, &to_storage(&form, None))
        .await
        .unwrap();

    let loaded = OrderFormRepo::find_by_id(&pool, &form.id)
        .await
        .unwrap()
        .expect("form should exist");
    assert_eq!(loaded.id, stored.id);
    assert_same_fields(&from_storage(&loaded), &form);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unset_choices_are_null_columns(pool: PgPool) {
    let form = FormDraft::new(chrono::Utc::now());
    OrderFormRepo::create(&pool, &to_storage(&form, None))
        .await
        .unwrap();

    let nulls: (Option<String>, Option<String>, Option<chrono::NaiveDate>, Option<String>, Option<String>) =
        sqlx::query_as(
            "SELECT communication_method, package_type, pickup_date, pickup_time, referral_source \
             FROM order_forms WHERE id = $1",
        )
        .bind(&form.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(nulls, (None, None, None, None, None));

    let loaded = OrderFormRepo::find_by_id(&pool, &form.id).await.unwrap().unwrap();
    let restored = from_storage(&loaded);
    assert_eq!(restored.pickup_date, "");
    assert_eq!(restored.package_type, "");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_visited_steps_read_as_empty(pool: PgPool) {
    let form = filled_form();
    OrderFormRepo::create(&pool, &to_storage(&form, None))
        .await
        .unwrap();
    sqlx::query(
        "UPDATE order_forms SET details = jsonb_set(details, '{visited_steps}', '\"lead\"') \
         WHERE id = $1",
    )
    .bind(&form.id)
    .execute(&pool)
    .await
    .unwrap();

    let loaded = OrderFormRepo::find_by_id(&pool, &form.id).await.unwrap().unwrap();
    let restored = from_storage(&loaded);
    assert!(restored.visited_steps.is_empty());
    assert_eq!(restored.theme, "clouds");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_draft_persists_changes(pool: PgPool) {
    let mut form = FormDraft::new(chrono::Utc::now());
    OrderFormRepo::create(&pool, &to_storage(&form, None))
        .await
        .unwrap();

    form.package_type = "medium".into();
    form.visit_step("package");
    let updated = OrderFormRepo::update_draft(&pool, &to_storage(&form, None))
        .await
        .unwrap()
        .expect("draft should update");
    let restored = from_storage(&updated);
    assert_eq!(restored.package_type, "medium");
    assert!(restored.visited_steps.contains("package"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_submitted_forms_are_not_updated_or_deleted(pool: PgPool) {
    let form = filled_form();
    OrderFormRepo::create(&pool, &to_storage(&form, None))
        .await
        .unwrap();
    OrderFormRepo::mark_submitted(&pool, &form.id, "2026-10-19-001")
        .await
        .unwrap()
        .expect("draft should flip");

    let update = OrderFormRepo::update_draft(&pool, &to_storage(&form, None))
        .await
        .unwrap();
    assert!(update.is_none());
    assert!(!OrderFormRepo::delete_draft(&pool, &form.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_draft(pool: PgPool) {
    let form = FormDraft::new(chrono::Utc::now());
    OrderFormRepo::create(&pool, &to_storage(&form, None))
        .await
        .unwrap();
    assert!(OrderFormRepo::delete_draft(&pool, &form.id).await.unwrap());
    assert!(OrderFormRepo::find_by_id(&pool, &form.id).await.unwrap().is_none());
    assert!(!OrderFormRepo::delete_draft(&pool, &form.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_status(pool: PgPool) {
    let draft = FormDraft::new(chrono::Utc::now());
    let submitted = filled_form();
    OrderFormRepo::create(&pool, &to_storage(&draft, None)).await.unwrap();
    OrderFormRepo::create(&pool, &to_storage(&submitted, None)).await.unwrap();
    OrderFormRepo::mark_submitted(&pool, &submitted.id, "2026-10-19-001")
        .await
        .unwrap();

    let all = OrderFormRepo::list(&pool, None, 25, 0).await.unwrap();
    assert_eq!(all.len(), 2);
    let drafts = OrderFormRepo::list(&pool, Some("draft"), 25, 0).await.unwrap();
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].id, draft.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_customer_upsert_reuses_email(pool: PgPool) {
    let input = UpsertCustomer {
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        email: "ada@example.com".into(),
        phone: "555-0100".into(),
    };
    let first = CustomerRepo::upsert_by_email(&pool, &input).await.unwrap();
    let second = CustomerRepo::upsert_by_email(
        &pool,
        &UpsertCustomer {
            phone: "555-0199".into(),
            ..input.clone()
        },
    )
    .await
    .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.phone, "555-0199");
    let emails: Vec<String> = sqlx::query_scalar("SELECT email FROM customers")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert_eq!(emails, vec!["ada@example.com".to_string()]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_updates_both_apply(pool: PgPool) {
    let form = FormDraft::new(chrono::Utc::now());
    OrderFormRepo::create(&pool, &to_storage(&form, None))
        .await
        .unwrap();

    let visit_lead = UpdateOrderForm {
        visit_step: Some("lead".into()),
        first_name: Some("Ada".into()),
        ..Default::default()
    };
    let visit_communication = UpdateOrderForm {
        visit_step: Some("communication".into()),
        theme: Some("clouds".into()),
        ..Default::default()
    };
    let (a, b) = tokio::join!(
        update_form(&pool, &form.id, &visit_lead),
        update_form(&pool, &form.id, &visit_communication)
    );
    a.unwrap();
    b.unwrap();

    let loaded = OrderFormRepo::find_by_id(&pool, &form.id).await.unwrap().unwrap();
    let restored = from_storage(&loaded);
    assert!(restored.visited_steps.contains("lead"));
    assert!(restored.visited_steps.contains("communication"));
    assert_eq!(restored.first_name, "Ada");
    assert_eq!(restored.theme, "clouds");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_links_customer_once_lead_has_data(pool: PgPool) {
    let form = FormDraft::new(chrono::Utc::now());
    OrderFormRepo::create(&pool, &to_storage(&form, None))
        .await
        .unwrap();

    let partial = UpdateOrderForm {
        first_name: Some("Ada".into()),
        ..Default::default()
    };
    let row = update_form(&pool, &form.id, &partial).await.unwrap();
    assert!(row.customer_id.is_none());

    let lead = UpdateOrderForm {
        last_name: Some("Lovelace".into()),
        email: Some(" Ada@Example.com ".into()),
        ..Default::default()
    };
    let row = update_form(&pool, &form.id, &lead).await.unwrap();
    let customer_id = row.customer_id.expect("customer should be linked");

    let email: String = sqlx::query_scalar("SELECT email FROM customers WHERE id = $1")
        .bind(customer_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(email, "ada@example.com");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_and_delete_errors(pool: PgPool) {
    let missing = update_form(&pool, "no-such-form", &UpdateOrderForm::default()).await;
    assert_matches!(missing, Err(DbError::Core(CoreError::NotFound { .. })));

    let form = filled_form();
    OrderFormRepo::create(&pool, &to_storage(&form, None))
        .await
        .unwrap();

    let too_many = UpdateOrderForm {
        quantities: Some(TreatQuantities {
            cupcakes: 3_000_000_000,
            ..Default::default()
        }),
        ..Default::default()
    };
    assert_matches!(
        update_form(&pool, &form.id, &too_many).await,
        Err(DbError::Core(CoreError::Validation(_)))
    );

    OrderFormRepo::mark_submitted(&pool, &form.id, "2026-10-19-001")
        .await
        .unwrap();
    assert_matches!(
        update_form(&pool, &form.id, &UpdateOrderForm::default()).await,
        Err(DbError::Core(CoreError::Conflict(_)))
    );
    assert_matches!(
        delete_form(&pool, &form.id).await,
        Err(DbError::Core(CoreError::Conflict(_)))
    );
}
