//! The vulnerable route family.
//!
//! Every handler funnels raw input into `service::vulnerable`, judges success
//! from the outcome (row returned / operation completed), and appends exactly
//! one attempt record per invocation. Execution errors — including those the
//! learner induces by breaking statement syntax — are logged as failed
//! attempts and then surfaced verbatim.

use axum::{
    Form, Json,
    extract::{Query, State},
};
use serde_json::Value;
use std::time::Instant;

use crate::catalog;
use crate::error::LabError;
use crate::handlers::record_attempt;
use crate::middleware::{ClientAddr, RequireLegalAck};
use crate::router::LabState;
use crate::service::vulnerable;
use crate::types::requests::{CommentForm, ItemQuery, LoginForm, SearchQuery, UserIdQuery};
use crate::types::responses::{
    ActionOutcome, BlindProbe, ItemDetail, LoginOutcome, SearchResults, TimingProbe,
};

pub async fn login(
    State(state): State<LabState>,
    addr: ClientAddr,
    _ack: RequireLegalAck,
    Form(form): Form<LoginForm>,
) -> Result<Json<LoginOutcome<Value>>, LabError> {
    let input = format!("username={}, password={}", form.username, form.password);
    match vulnerable::login(state.storage.pool(), &form.username, &form.password).await {
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
    _ack: RequireLegalAck,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SearchResults<Value>>, LabError> {
    if params.q.is_empty() {
        return Ok(Json(SearchResults {
            query: params.q,
            products: Vec::new(),
        }));
    }

    let input = format!("query={}", params.q);
    match vulnerable::search(state.storage.pool(), &params.q).await {
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
    _ack: RequireLegalAck,
    Query(params): Query<ItemQuery>,
) -> Result<Json<ItemDetail<Value, Value>>, LabError> {
    let Some(raw_id) = params.id else {
        return Err(LabError::InvalidInput("missing `id` parameter".to_string()));
    };

    let input = format!("id={raw_id}");
    match vulnerable::item_detail(state.storage.pool(), &raw_id).await {
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
    _ack: RequireLegalAck,
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
    match vulnerable::insert_comment(
        state.storage.pool(),
        &form.product_id,
        &form.author,
        &form.content,
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
    _ack: RequireLegalAck,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<BlindProbe>, LabError> {
    let Some(raw_user_id) = params.user_id else {
        return Err(LabError::InvalidInput(
            "missing `user_id` parameter".to_string(),
        ));
    };

    let input = format!("user_id={raw_user_id}");
    match vulnerable::boolean_probe(state.storage.pool(), &raw_user_id).await {
        Ok(found) => {
            record_attempt(&state.storage, catalog::BOOLEAN_BLIND, &input, found, &addr).await;
            let result = if found {
                "User found and admin exists"
            } else {
                "User not found or no admin exists"
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
    _ack: RequireLegalAck,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<TimingProbe>, LabError> {
    let Some(raw_user_id) = params.user_id else {
        return Err(LabError::InvalidInput(
            "missing `user_id` parameter".to_string(),
        ));
    };

    let input = format!("user_id={raw_user_id}");
    let started = Instant::now();
    match vulnerable::timing_probe(state.storage.pool(), &raw_user_id).await {
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
