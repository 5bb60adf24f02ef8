use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use audit_event::{AuditEvent, AuditSubtype, Event};
use audit_pipeline::{
    ErrorKind, JsonFormatter, JsonxFormatter, Node, NodeError, NodeType, Pipeline, PipelineError,
};
use serde_json::json;
use serde_json::value::RawValue;
use tokio_util::sync::CancellationToken;

/// Node of a fixed type that counts calls and otherwise does nothing.
#[derive(Default)]
struct CountingNode {
    node_type: Option<NodeType>,
    processed: AtomicUsize,
    reopened: AtomicUsize,
}

impl CountingNode {
    fn of(node_type: NodeType) -> Arc<Self> {
        Arc::new(Self {
            node_type: Some(node_type),
            ..Default::default()
        })
    }
}

impl Node for CountingNode {
    fn process<'a>(
        &self,
        _ctx: &CancellationToken,
        event: &'a mut Event,
    ) -> Result<&'a mut Event, NodeError> {
        self.processed.fetch_add(1, Ordering::SeqCst);
        Ok(event)
    }

    fn name(&self) -> &str {
        "CountingNode"
    }

    fn node_type(&self) -> NodeType {
        self.node_type.unwrap_or(NodeType::Filter)
    }

    fn reopen(&self) -> Result<(), NodeError> {
        self.reopened.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn event_with(data: serde_json::Value) -> Event {
    let audit = AuditEvent::builder()
        .id("123")
        .subtype(AuditSubtype::Request)
        .data(data)
        .build()
        .unwrap();
    Event::from_audit(audit)
}

/// Builds an event whose data is kept as the given JSON source text.
fn event_with_raw(json: &str) -> Event {
    let audit = AuditEvent::builder()
        .id("123")
        .subtype(AuditSubtype::Request)
        .raw_data(RawValue::from_string(json.to_string()).unwrap())
        .build()
        .unwrap();
    Event::from_audit(audit)
}

fn formatting_pipeline() -> Pipeline {
    Pipeline::builder()
        .node("json", Arc::new(JsonFormatter::new()))
        .node("jsonx", Arc::new(JsonxFormatter::new()))
        .build()
        .unwrap()
}

#[test]
fn test_pipeline_formats_json_then_jsonx() {
    let pipeline = formatting_pipeline();
    let mut event = event_with_raw(
        r#"{"type": "magic", "amount": 1.50, "delta": -0, "tag": "a", "tag": "b"}"#,
    );

    let event = pipeline
        .process(&CancellationToken::new(), &mut event)
        .unwrap();

    let json = std::str::from_utf8(event.format("json").unwrap()).unwrap();
    let xml = std::str::from_utf8(event.format("jsonx").unwrap()).unwrap();
    assert!(json.contains(r#""amount": 1.50"#));
    assert!(xml.contains(r#"<amount type="number">1.50</amount>"#));
    assert!(xml.contains(r#"<delta type="number">-0</delta>"#));
    assert!(xml.contains(r#"<tag type="string">a</tag><tag type="string">b</tag>"#));
    assert_eq!(pipeline.node_ids().collect::<Vec<_>>(), ["json", "jsonx"]);
}

#[test]
fn test_pipeline_wraps_node_failure() {
    let pipeline = Pipeline::builder()
        .node("jsonx", Arc::new(JsonxFormatter::new()))
        .build()
        .unwrap();
    let mut event = event_with(json!({"type": "magic"}));

    let err = pipeline
        .process(&CancellationToken::new(), &mut event)
        .unwrap_err();

    assert!(matches!(&err, PipelineError::Node { node, .. } if node == "jsonx"));
    assert_eq!(err.node_error().unwrap().kind(), ErrorKind::InvalidParameter);
    assert_eq!(
        err.to_string(),
        "node jsonx failed: JsonxFormatter::process: pre-formatted JSON required but not found: invalid parameter"
    );
    assert_eq!(event.formats().count(), 0);
}

#[test]
fn test_pipeline_runs_sinks_after_formatters() {
    let sink = CountingNode::of(NodeType::Sink);
    let pipeline = Pipeline::builder()
        .node("source", CountingNode::of(NodeType::Source))
        .node("json", Arc::new(JsonFormatter::new()))
        .node("jsonx", Arc::new(JsonxFormatter::new()))
        .node("sink", sink.clone())
        .node("audit-sink", CountingNode::of(NodeType::Sink))
        .build()
        .unwrap();

    let mut event = event_with(json!({"type": "magic"}));
    pipeline
        .process(&CancellationToken::new(), &mut event)
        .unwrap();
    pipeline.reopen().unwrap();

    assert_eq!(sink.processed.load(Ordering::SeqCst), 1);
    assert_eq!(sink.reopened.load(Ordering::SeqCst), 1);
}

#[test]
fn test_pipeline_stops_at_first_failure() {
    let sink = CountingNode::of(NodeType::Sink);
    let pipeline = Pipeline::builder()
        .node("jsonx", Arc::new(JsonxFormatter::new()))
        .node("sink", sink.clone())
        .build()
        .unwrap();

    let mut event = event_with(json!({"type": "magic"}));
    assert!(
        pipeline
            .process(&CancellationToken::new(), &mut event)
            .is_err()
    );
    assert_eq!(sink.processed.load(Ordering::SeqCst), 0);
}

#[test]
fn test_pipeline_rejects_empty() {
    assert!(matches!(
        Pipeline::builder().build(),
        Err(PipelineError::Empty)
    ));
}

#[test]
fn test_pipeline_rejects_duplicate_ids() {
    let err = Pipeline::builder()
        .node("fmt", Arc::new(JsonFormatter::new()))
        .node("fmt", Arc::new(JsonxFormatter::new()))
        .build()
        .unwrap_err();
    assert!(matches!(err, PipelineError::DuplicateNode(id) if id == "fmt"));
}

#[test]
fn test_pipeline_rejects_formatter_after_sink() {
    let err = Pipeline::builder()
        .node("json", Arc::new(JsonFormatter::new()))
        .node("sink", CountingNode::of(NodeType::Sink))
        .node("jsonx", Arc::new(JsonxFormatter::new()))
        .build()
        .unwrap_err();

    match err {
        PipelineError::InvalidOrder {
            node,
            node_type,
            position,
            ..
        } => {
            assert_eq!(node, "jsonx");
            assert_eq!(node_type, NodeType::Formatter);
            assert_eq!(position, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_pipeline_rejects_late_source() {
    let err = Pipeline::builder()
        .node("json", Arc::new(JsonFormatter::new()))
        .node("source", CountingNode::of(NodeType::Source))
        .build()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "source node source cannot appear at position 1: a source must be the first node"
    );
}
