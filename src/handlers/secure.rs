//! The secure route family.
//!
//! Same surface as the vulnerable family, but all values travel as bound
//! parameters and numeric identifiers are parsed up front. For well-formed
//! legitimate input the responses are equivalent to the vulnerable ones, so
//! learners can diff the two implementations' behavior. Attempts are logged
//! under the same exercise names as the vulnerable counterparts.

use axum::{
    Form, Json,
    extract::{Query, State},
};
use std::time::Instant;

use crate::catalog;
use crate::db::models::{Comment, Product, User};
use crate::error::LabError;
use crate::handlers::record_attempt;
use crate::middleware::ClientAddr;
use crate::router::LabState;
use crate::service::secure;
use crate::types::requests::{CommentForm, ItemQuery, LoginForm, SearchQuery, UserIdQuery};
use crate::types::responses::{
    ActionOutcome, BlindProbe, ItemDetail, LoginOutcome, SearchResults, TimingProbe,
};

pub async fn login(
    State(state): State<LabState>,
    addr: ClientAddr,
    Form(form): Form<LoginForm>,
) -> Result<Json<LoginOutcome<User>>, LabError> {
    let input = format!("username={}, password={}", form.username, form.password);
    match secure::login(state.storage.pool(), &form.username, &form.password).await {
        Ok(Some(user)) => {
            record_attempt(&state.storage, catalog::LOGIN_BASIC, &input, true, &addr).await;
            Ok(Json(LoginOutcome {
                success: true,
                message: "Login successful!",
                user: Some(user),
            }))
        }
        Ok(None) => {
            record_attempt(&state.storage, catalog::LOGIN_BASIC, &input, false, &addr).await;
            Ok(Json(LoginOutcome {
                success: false,
                message: "Invalid credentials",
                user: None,
            }))
        }
        Err(e) => {
            record_attempt(&state.storage, catalog::LOGIN_BASIC, &input, false, &addr).await;
            Err(e)
        }
    }
}

pub async fn search(
    State(state): State<LabState>,
    addr: ClientAddr,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResults<Product>>, LabError> {
    if params.q.is_empty() {
        return Ok(Json(SearchResults {
            query: params.q,
            products: Vec::new(),
        }));
    }

    let input = format!("query={}", params.q);
    match secure::search_products(state.storage.pool(), &params.q).await {
        Ok(products) => {
            record_attempt(
                &state.storage,
                catalog::SEARCH_BASIC,
                &input,
                !products.is_empty(),
                &addr,
            )
            .await;
            Ok(Json(SearchResults {
                query: params.q,
                products,
            }))
        }
        Err(e) => {
            record_attempt(&state.storage, catalog::SEARCH_BASIC, &input, false, &addr).await;
            Err(e)
        }
    }
}

pub async fn item_detail(
    State(state): State<LabState>,
    addr: ClientAddr,
    Query(params): Query<ItemQuery>,
) -> Result<Json<ItemDetail<Product, Comment>>, LabError> {
    let Some(raw_id) = params.id else {
        return Err(LabError::InvalidInput("missing `id` parameter".to_string()));
    };

    let input = format!("id={raw_id}");
    let id = match secure::parse_id(&raw_id, "product ID") {
        Ok(id) => id,
        Err(e) => {
            record_attempt(&state.storage, catalog::ITEM_DETAIL, &input, false, &addr).await;
            return Err(e);
        }
    };

    let pool = state.storage.pool();
    let outcome = async {
        let Some(product) = secure::product_by_id(pool, id).await? else {
            return Ok(None);
        };
        let comments = secure::comments_for_product(pool, id).await?;
        Ok::<_, LabError>(Some((product, comments)))
    }
    .await;

    match outcome {
        Ok(Some((product, comments))) => {
            record_attempt(&state.storage, catalog::ITEM_DETAIL, &input, true, &addr).await;
            Ok(Json(ItemDetail {
                product,
                comment_count: comments.len(),
                comments,
            }))
        }
        Ok(None) => {
            record_attempt(&state.storage, catalog::ITEM_DETAIL, &input, false, &addr).await;
            Err(LabError::NotFound("Product"))
        }
        Err(e) => {
            record_attempt(&state.storage, catalog::ITEM_DETAIL, &input, false, &addr).await;
            Err(e)
        }
    }
}

pub async fn comment(
    State(state): State<LabState>,
    addr: ClientAddr,
    Form(form): Form<CommentForm>,
) -> Result<Json<ActionOutcome>, LabError> {
    if form.product_id.is_empty() || form.author.is_empty() || form.content.is_empty() {
        return Err(LabError::InvalidInput(
            "product_id, author and content are required".to_string(),
        ));
    }

    let input = format!(
        "product_id={}, author={}, content={}",
        form.product_id, form.author, form.content
    );
    let product_id = match secure::parse_id(&form.product_id, "product ID") {
        Ok(id) => id,
        Err(e) => {
            record_attempt(&state.storage, catalog::COMMENT_FORM, &input, false, &addr).await;
            return Err(e);
        }
    };

    match secure::insert_comment(
        state.storage.pool(),
        product_id,
        form.author.trim(),
        form.content.trim(),
    )
    .await
    {
        Ok(()) => {
            record_attempt(&state.storage, catalog::COMMENT_FORM, &input, true, &addr).await;
            Ok(Json(ActionOutcome {
                success: true,
                message: "Comment added successfully!",
            }))
        }
        Err(e) => {
            record_attempt(&state.storage, catalog::COMMENT_FORM, &input, false, &addr).await;
            Err(e)
        }
    }
}

pub async fn boolean_blind(
    State(state): State<LabState>,
    addr: ClientAddr,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<BlindProbe>, LabError> {
    let Some(raw_user_id) = params.user_id else {
        return Err(LabError::InvalidInput(
            "missing `user_id` parameter".to_string(),
        ));
    };

    let input = format!("user_id={raw_user_id}");
    let user_id = match secure::parse_id(&raw_user_id, "user ID") {
        Ok(id) => id,
        Err(e) => {
            record_attempt(&state.storage, catalog::BOOLEAN_BLIND, &input, false, &addr).await;
            return Err(e);
        }
    };

    let pool = state.storage.pool();
    let outcome = async {
        let user = secure::user_by_id(pool, user_id).await?;
        let admin = secure::admin_exists(pool).await?;
        Ok::<_, LabError>((user.is_some(), admin))
    }
    .await;

    match outcome {
        Ok((found, admin)) => {
            record_attempt(&state.storage, catalog::BOOLEAN_BLIND, &input, found, &addr).await;
            let result = match (found, admin) {
                (true, true) => "User found and admin exists",
                (true, false) => "User found but no admin exists",
                (false, _) => "User not found",
            };
            Ok(Json(BlindProbe {
                result,
                user_id: raw_user_id,
            }))
        }
        Err(e) => {
            record_attempt(&state.storage, catalog::BOOLEAN_BLIND, &input, false, &addr).await;
            Err(e)
        }
    }
}

pub async fn time_blind(
    State(state): State<LabState>,
    addr: ClientAddr,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<TimingProbe>, LabError> {
    let Some(raw_user_id) = params.user_id else {
        return Err(LabError::InvalidInput(
            "missing `user_id` parameter".to_string(),
        ));
    };

    let input = format!("user_id={raw_user_id}");
    let started = Instant::now();
    let user_id = match secure::parse_id(&raw_user_id, "user ID") {
        Ok(id) => id,
        Err(e) => {
            record_attempt(&state.storage, catalog::TIME_BLIND, &input, false, &addr).await;
            return Err(e);
        }
    };

    let pool = state.storage.pool();
    let outcome = async {
        let user = secure::user_by_id(pool, user_id).await?;
        secure::admin_exists(pool).await?;
        Ok::<_, LabError>(user.is_some())
    }
    .await;

    match outcome {
        Ok(found) => {
            let response_time = started.elapsed().as_secs_f64();
            record_attempt(&state.storage, catalog::TIME_BLIND, &input, found, &addr).await;
            let result = if found {
                format!("User found (response time: {response_time:.3}s)")
            } else {
                format!("User not found (response time: {response_time:.3}s)")
            };
            Ok(Json(TimingProbe {
                result,
                response_time,
            }))
        }
        Err(e) => {
            record_attempt(&state.storage, catalog::TIME_BLIND, &input, false, &addr).await;
            Err(e)
        }
    }
}
