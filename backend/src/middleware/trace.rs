//! Request tracing middleware.
//!
//! Every request runs with a [`TraceId`] in task-local scope. A well-formed
//! `trace-id` request header is reused; otherwise a fresh UUID is generated.
//! The identifier is echoed on the response and attached to the completion
//! log line.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use futures_util::future::{Ready, ready};
use tracing::{error, info};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Whole milliseconds, saturating at `u64::MAX`.
fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Tracing middleware.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_backend::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

fn incoming_trace_id(req: &ServiceRequest) -> Option<TraceId> {
    req.headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = incoming_trace_id(&req).unwrap_or_else(TraceId::generate);
        let method = req.method().clone();
        let path = req.path().to_owned();
        let started = Instant::now();

        let fut = TraceId::sync_scope(trace_id, || self.service.call(req));
        Box::pin(TraceId::scope(trace_id, async move {
            let mut res = fut.await?;
            match HeaderValue::from_str(&trace_id.to_string()) {
                Ok(value) => {
                    res.response_mut()
                        .headers_mut()
                        .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                }
                Err(err) => {
                    error!(error = %err, %trace_id, "failed to encode trace identifier header");
                }
            }
            info!(
                %trace_id,
                %method,
                path,
                status = res.status().as_u16(),
                elapsed_ms = elapsed_ms(started.elapsed()),
                "request completed"
            );
            Ok(res)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Error as DomainError;
    use crate::inbound::http::ApiResult;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse, web};
    use rstest::rstest;

    async fn call(
        handler_body: bool,
        incoming: Option<&str>,
    ) -> (actix_web::dev::ServiceResponse, String) {
        let app = actix_test::init_service(
            App::new()
                .wrap(Trace)
                .route(
                    "/ok",
                    web::get().to(|| async {
                        let id = TraceId::current().map(|id| id.to_string()).unwrap_or_default();
                        HttpResponse::Ok().body(id)
                    }),
                )
                .route(
                    "/fail",
                    web::get().to(|| async {
                        ApiResult::<HttpResponse>::Err(DomainError::not_found("User not found"))
                    }),
                ),
        )
        .await;
        let mut req = actix_test::TestRequest::get().uri(if handler_body { "/ok" } else { "/fail" });
        if let Some(value) = incoming {
            req = req.insert_header((TRACE_ID_HEADER, value));
        }
        let res = actix_test::call_service(&app, req.to_request()).await;
        let header = res
            .headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("header is ascii")
            .to_owned();
        (res, header)
    }

    #[actix_web::test]
    async fn exposes_trace_id_in_handler() {
        let (res, header) = call(true, None).await;
        let body = actix_test::read_body(res).await;
        assert_eq!(std::str::from_utf8(&body).expect("utf8 body"), header);
    }

    #[actix_web::test]
    async fn propagates_trace_id_in_error_body() {
        let (res, header) = call(false, None).await;
        let body: DomainError = actix_test::read_body_json(res).await;
        assert_eq!(body.trace_id(), Some(header.as_str()));
    }

    #[rstest]
    #[case(Some("00000000-0000-0000-0000-000000000001"), true)]
    #[case(Some("not-a-uuid"), false)]
    #[case(None, false)]
    #[actix_web::test]
    async fn reuses_only_well_formed_incoming_ids(
        #[case] incoming: Option<&str>,
        #[case] reused: bool,
    ) {
        let (_, header) = call(true, incoming).await;
        assert_eq!(incoming == Some(header.as_str()), reused);
        assert!(header.parse::<TraceId>().is_ok());
    }

    #[rstest]
    #[case(Duration::from_millis(1_500), 1_500)]
    #[case(Duration::MAX, u64::MAX)]
    fn elapsed_ms_saturates(#[case] elapsed: Duration, #[case] expected: u64) {
        assert_eq!(elapsed_ms(elapsed), expected);
    }
}
