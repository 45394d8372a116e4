//! Request metrics for the HTTP server.
//!
//! When Prometheus is configured the whole app is wrapped in
//! `actix-web-prom`, which times every request and serves `/metrics`. The
//! proof counters from [`culture_proof::outbound::metrics`] register on the
//! same registry, so one scrape returns HTTP latencies alongside verification
//! outcomes and mint fallbacks. Without Prometheus the layer only boxes the
//! response body so both app shapes share one type.

use std::sync::Arc;

use actix_service::boxed::{self, BoxService};
use actix_service::{Service, ServiceExt as _, Transform};
use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Compat;
use actix_web_prom::PrometheusMetrics;
use futures_util::future::LocalBoxFuture;

type BoxedApp = BoxService<ServiceRequest, ServiceResponse<BoxBody>, actix_web::Error>;

#[derive(Clone)]
pub(crate) enum RequestMetrics {
    /// Requests are timed and `/metrics` is served.
    Exported(Arc<PrometheusMetrics>),
    /// Requests pass straight through.
    Passthrough,
}

impl RequestMetrics {
    pub(crate) fn from_option(metrics: Option<PrometheusMetrics>) -> Self {
        metrics.map_or(Self::Passthrough, |metrics| Self::Exported(Arc::new(metrics)))
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestMetrics
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BoxedApp;
    type Future = LocalBoxFuture<'static, Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        let Self::Exported(metrics) = self else {
            let passthrough = service.map(ServiceResponse::map_into_boxed_body);
            return Box::pin(async move { Ok(boxed::service(passthrough)) });
        };
        let exported = Compat::new(PrometheusMetrics::clone(metrics)).new_transform(service);
        Box::pin(async move { Ok(boxed::service(exported.await?)) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use actix_web_prom::PrometheusMetricsBuilder;
    use rstest::rstest;

    use culture_proof::domain::ports::{ProofMetrics as _, VerificationOutcome};
    use culture_proof::outbound::metrics::PrometheusProofMetrics;

    async fn scrape(layer: RequestMetrics) -> (StatusCode, String) {
        let app = test::init_service(
            App::new()
                .wrap(layer)
                .route("/health", web::get().to(HttpResponse::Ok)),
        )
        .await;
        test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        let response =
            test::call_service(&app, test::TestRequest::get().uri("/metrics").to_request()).await;
        let status = response.status();
        let body = test::read_body(response).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[rstest]
    #[actix_web::test]
    async fn exported_scrape_includes_proof_counters() {
        let prometheus = PrometheusMetricsBuilder::new("culture_proof_test")
            .endpoint("/metrics")
            .build()
            .expect("metrics build");
        let proofs = PrometheusProofMetrics::new(&prometheus.registry).expect("register counters");
        proofs
            .record_verification(VerificationOutcome::Replayed)
            .await
            .expect("record");

        let (status, body) = scrape(RequestMetrics::from_option(Some(prometheus))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("culture_proof_verifications_total"));
        assert!(body.contains("culture_proof_test_http_requests_total"));
    }

    #[rstest]
    #[actix_web::test]
    async fn passthrough_serves_no_metrics_endpoint() {
        let (status, _) = scrape(RequestMetrics::from_option(None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
