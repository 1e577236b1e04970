//! Client tests against a local SOAP stub server
//!
//! Exercises the real HTTP path: envelope on the wire, endpoint routing, header
//! classification and transport error mapping.

mod common;

use common::{
    PASSWORD, StubServer, USERNAME, order_header, query_header, soap_fault, soap_response,
};
use globalsign_api::{
    ApiError, CertificateApi, ContactInfo, Credentials, EndpointOverrides, GlobalSignClient,
    HashAlgorithm, OrderKind, OrderRequest, PlaceOrderRequest, ProductCode, ResendEmailType,
};

const CSR: &str = "-----BEGIN CERTIFICATE REQUEST-----\nMIIBstub\n-----END CERTIFICATE REQUEST-----";

fn order(product: ProductCode, csr: Option<&str>) -> OrderRequest {
    OrderRequest {
        product,
        kind: OrderKind::New,
        fqdn: "example.com".to_string(),
        csr: csr.map(ToString::to_string),
        wildcard: false,
    }
}

fn contact() -> ContactInfo {
    ContactInfo {
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        phone: "+1 555 0100".to_string(),
        email: "ada@example.com".to_string(),
    }
}

#[tokio::test]
async fn test_validate_sends_soap_envelope() {
    let server = StubServer::start(vec![(
        200,
        soap_response(
            "GSValidateOrderParameters",
            &format!("{}<OrderID>CE20240301</OrderID>", order_header(0, &[])),
        ),
    )])
    .await;
    let client = server.client();

    let outcome = require_ok!(
        client
            .validate_order_parameters(&order(ProductCode::DomainSsl, Some(CSR)))
            .await
    );
    assert!(outcome.is_success());
    assert_eq!(outcome.exchange.operation, "GSValidateOrderParameters");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.path, "/kb/ws/GasOrder");
    assert_eq!(request.header("SOAPAction"), Some("\"\""));
    assert!(
        request
            .header("Content-Type")
            .is_some_and(|v| v.starts_with("text/xml"))
    );
    assert!(request.body.contains("<ns1:GSValidateOrderParameters>"));
    assert!(request.body.contains(r#"xmlns:ns1="http://stub.order.gasapiserver.esp.globalsign.com""#));
    assert!(request.body.contains(&format!("<UserName>{USERNAME}</UserName>")));
    assert!(request.body.contains(&format!("<Password>{PASSWORD}</Password>")));
    assert!(!request.body.contains("<FQDN>"));

    // The diagnostic copy never carries the password
    assert!(!outcome.exchange.request.to_string().contains(PASSWORD));

    let validation = require_ok!(outcome.into_result());
    assert_eq!(validation.order_id.as_deref(), Some("CE20240301"));
}

#[tokio::test]
async fn test_rejection_is_an_outcome() {
    let server = StubServer::start(vec![(
        200,
        soap_response(
            "GSDVOrder",
            &order_header(
                -1,
                &[(
                    "-101",
                    "Your account does not have enough remaining balance to process this request",
                )],
            ),
        ),
    )])
    .await;
    let client = server.client();

    let request = PlaceOrderRequest {
        order: order(ProductCode::AlphaSsl, Some(CSR)),
        order_id: Some("CE1".to_string()),
        approver_email: Some("admin@example.com".to_string()),
        contact: contact(),
        organization: None,
        extended_validation: None,
        san_entries: vec![],
    };
    let outcome = require_ok!(client.place_order(&request).await);
    assert!(!outcome.is_success());
    assert_eq!(outcome.header.success_code, -1);

    let err = outcome.into_result().unwrap_err();
    assert!(err.is_balance_error(), "unexpected error: {err}");
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_soap_fault_over_http_500() {
    let server = StubServer::start(vec![(
        500,
        soap_fault("soap:Client", "Unmarshalling Error"),
    )])
    .await;
    let client = server.client();

    let err = client.get_approver_list("example.com").await.unwrap_err();
    assert!(
        matches!(&err, ApiError::SoapFault { fault_string, .. } if fault_string == "Unmarshalling Error"),
        "unexpected error: {err:?}"
    );
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_bad_gateway_maps_to_http_status() {
    let server = StubServer::start(vec![(502, "<html>upstream down</html>".to_string())]).await;
    let client = server.client();

    let err = client.list_orders().await.unwrap_err();
    assert!(
        matches!(err, ApiError::HttpStatus { status: 502, .. }),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_garbage_body_maps_to_parse_error() {
    let server = StubServer::start(vec![(200, "not xml at all <".to_string())]).await;
    let client = server.client();

    let err = client.get_order_by_id("CE1").await.unwrap_err();
    assert!(
        matches!(err, ApiError::ParseError { .. }),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn test_approver_list_uses_query_service() {
    let server = StubServer::start(vec![(
        200,
        soap_response(
            "GetDVApproverList",
            &format!(
                "{}<OrderID>CE7</OrderID><Approvers>\
                 <Approver><ApproverType>Domain</ApproverType><ApproverEmail>admin@example.com</ApproverEmail></Approver>\
                 </Approvers>",
                query_header(0, &[])
            ),
        ),
    )])
    .await;
    let client = server.client();

    let list = require_ok!(
        require_ok!(client.get_approver_list("example.com").await).into_result()
    );
    assert_eq!(list.order_id.as_deref(), Some("CE7"));
    assert_eq!(list.first_email(), Some("admin@example.com"));

    let request = &server.requests()[0];
    assert_eq!(request.path, "/kb/ws/GasQuery");
    assert!(request.body.contains("<QueryRequestHeader>"));
    assert!(request.body.contains("<FQDN>example.com</FQDN>"));
}

#[tokio::test]
async fn test_autocsr_order_uses_without_csr_service() {
    let server = StubServer::start(vec![(
        200,
        soap_response(
            "GSDVOrderWithoutCSR",
            &format!("{}<OrderID>CE8</OrderID>", order_header(0, &[])),
        ),
    )])
    .await;
    let client = server.client();

    let request = PlaceOrderRequest {
        order: order(ProductCode::DomainSslAutoCsr, None),
        order_id: Some("CE8".to_string()),
        approver_email: Some("admin@example.com".to_string()),
        contact: contact(),
        organization: None,
        extended_validation: None,
        san_entries: vec![],
    };
    let placement = require_ok!(require_ok!(client.place_order(&request).await).into_result());
    assert_eq!(placement.order_id.as_deref(), Some("CE8"));

    let request = &server.requests()[0];
    assert_eq!(request.path, "/kb/ws/GasOrderWithoutCSR");
    assert!(request.body.contains("<ns1:GSDVOrderWithoutCSR>"));
    assert!(request.body.contains("<ProductCode>DV_SKIP_SHA2</ProductCode>"));
}

#[tokio::test]
async fn test_maintenance_operations_route_to_their_services() {
    let server = StubServer::start(vec![
        (200, soap_response("ReIssue", &format!("{}<OrderID>CE10</OrderID>", order_header(0, &[])))),
        (200, soap_response("ChangeApproverEmail", &order_header(0, &[]))),
        (200, soap_response("ResendEmail", &order_header(0, &[]))),
    ])
    .await;
    let client = server.client();

    let reissue = require_ok!(
        require_ok!(client.reissue_certificate("CE9", CSR, HashAlgorithm::Sha256).await)
            .into_result()
    );
    assert_eq!(reissue.order_id.as_deref(), Some("CE10"));
    require_ok!(
        require_ok!(
            client
                .change_approver_email("CE9", "hostmaster@example.com", "example.com")
                .await
        )
        .into_result()
    );
    require_ok!(
        require_ok!(
            client
                .resend_approver_email("CE9", ResendEmailType::ApproverEmail)
                .await
        )
        .into_result()
    );

    let paths: Vec<String> = server.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(
        paths,
        [
            "/kb/ws/v1/GASService",
            "/kb/ws/v1/ServerSSLService",
            "/kb/ws/GasOrder"
        ]
    );
    assert!(server.requests()[0].body.contains("<TargetOrderID>CE9</TargetOrderID>"));
}

#[tokio::test]
async fn test_order_detail_with_fulfillment() {
    let server = StubServer::start(vec![(
        200,
        soap_response(
            "GetOrderByOrderID",
            &format!(
                "{}<OrderID>CE9</OrderID><OrderDetail>\
                 <OrderInfo><OrderID>CE9</OrderID><ProductCode>DV_SHA2</ProductCode><OrderStatus>4</OrderStatus></OrderInfo>\
                 <Fulfillment><ServerCertificate><X509Cert>LEAF</X509Cert></ServerCertificate></Fulfillment>\
                 </OrderDetail>",
                query_header(0, &[])
            ),
        ),
    )])
    .await;
    let client = server.client();

    let detail = require_ok!(require_ok!(client.get_order_by_id("CE9").await).into_result());
    assert_eq!(detail.product_code.as_deref(), Some("DV_SHA2"));
    assert_eq!(
        ProductCode::from_code(detail.product_code.as_deref().unwrap_or_default()),
        Some(ProductCode::DomainSsl)
    );
    let fulfillment = require_some!(detail.fulfillment);
    assert_eq!(fulfillment.server_certificate.as_deref(), Some("LEAF"));
    assert!(
        server.requests()[0]
            .body
            .contains("<ReturnFulfillment>true</ReturnFulfillment>")
    );
}

#[tokio::test]
async fn test_invalid_parameter_sends_nothing() {
    let server = StubServer::start(vec![]).await;
    let client = server.client();

    let err = client.get_approver_list("  ").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidParameter { .. }));
    assert!(err.is_expected());
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_unreachable_endpoint_is_connect_failed() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = GlobalSignClient::builder(Credentials::new(USERNAME, PASSWORD))
        .endpoints(EndpointOverrides::with_base_url(&format!("http://{addr}")))
        .max_reconnects(2)
        .build()
        .unwrap();

    let err = client.list_orders().await.unwrap_err();
    assert!(
        matches!(err, ApiError::ConnectFailed { .. }),
        "unexpected error: {err:?}"
    );
}
