use hilink_xml::{parse, request_document, ApiResponse};
use pretty_assertions::assert_eq;

const SES_TOK_INFO: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<response>
<SesInfo>SessionID=Hk2cbQm0ZpVr8xXQ3T4Yq1Jb6nLz0sWeK9aDfGh7</SesInfo>
<TokInfo>ZkQ3wU2pX7nB1cV8mA4sD6fG9hJ0kL5q</TokInfo>
</response>"#;

#[test]
fn parses_session_token_response() {
    let node = parse(SES_TOK_INFO).expect("parse SesTokInfo");
    assert_eq!(node.tag, "response");
    assert_eq!(
        node.get_text(&["SesInfo"]),
        Some("SessionID=Hk2cbQm0ZpVr8xXQ3T4Yq1Jb6nLz0sWeK9aDfGh7")
    );
    assert_eq!(
        node.get_text(&["TokInfo"]),
        Some("ZkQ3wU2pX7nB1cV8mA4sD6fG9hJ0kL5q")
    );
}

#[test]
fn written_request_parses_back_to_same_fields() {
    let doc = request_document([
        ("DhcpIPAddress", "10.0.0.1"),
        ("DhcpLanNetmask", "255.255.255.0"),
    ])
    .expect("write request");

    let node = parse(&doc).expect("parse request");
    let tags: Vec<&str> = node.children.iter().map(|c| c.tag.as_str()).collect();
    assert_eq!(tags, vec!["DhcpIPAddress", "DhcpLanNetmask"]);
    assert_eq!(node.get_text(&["DhcpIPAddress"]), Some("10.0.0.1"));
}

#[test]
fn pretty_printed_error_is_classified() {
    let body = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\r\n<error>\r\n<code>100003</code>\r\n<message></message>\r\n</error>\r\n";
    assert_eq!(
        ApiResponse::parse(body).expect("parse"),
        ApiResponse::Error {
            code: Some(100003),
            message: None,
        }
    );
}

#[test]
fn data_response_is_not_an_error() {
    match ApiResponse::parse(SES_TOK_INFO).expect("parse") {
        ApiResponse::Response(node) => assert_eq!(
            node.get_text(&["TokInfo"]),
            Some("ZkQ3wU2pX7nB1cV8mA4sD6fG9hJ0kL5q")
        ),
        other => panic!("unexpected error body {other:?}"),
    }
}
