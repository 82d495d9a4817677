//! Integration tests for file loading
//!
//! These tests validate `load_file`:
//! - Reader selection by registration order
//! - Reader and lookup failures reported through the observer
//! - Injecting loaded data into the graph

mod common;

use common::algorithms::{Sink, TextReader};
use common::builders::TestNetworkBuilder;
use common::observers::{Outcome, RecordingObserver};
use mockall::mock;
use processing_network::algorithms::DataInject;
use processing_network::network::{AlgorithmRef, Payload, Reader};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

mock! {
    pub FileReader {}

    impl Reader for FileReader {
        fn name(&self) -> &str;
        fn can_load(&self, path: &Path) -> bool;
        fn load(&self, path: &Path) -> anyhow::Result<Payload>;
    }
}

#[test]
fn test_load_text_file() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    write!(file, "vertex 0 0 0").unwrap();

    let network = TestNetworkBuilder::new("reader-network")
        .reader(Arc::new(TextReader))
        .start();
    let observer = RecordingObserver::new();

    let command = network.load_file(file.path(), observer.handle());
    assert!(observer.wait_one().is_success());
    assert_eq!(command.path(), file.path());
    assert_eq!(command.reader_name().as_deref(), Some("Text"));
    assert_eq!(command.result_as::<String>().unwrap().as_str(), "vertex 0 0 0");
}

#[test]
fn test_first_accepting_reader_is_used() {
    let mut skipped = MockFileReader::new();
    skipped.expect_name().return_const("Skipped".to_string());
    skipped.expect_can_load().times(1).return_const(false);
    skipped.expect_load().never();

    let mut chosen = MockFileReader::new();
    chosen.expect_name().return_const("Chosen".to_string());
    chosen.expect_can_load().times(1).return_const(true);
    chosen
        .expect_load()
        .times(1)
        .returning(|_| Ok(Arc::new(17u32) as Payload));

    let mut shadowed = MockFileReader::new();
    shadowed.expect_name().return_const("Shadowed".to_string());
    shadowed.expect_can_load().never();
    shadowed.expect_load().never();

    let network = TestNetworkBuilder::new("mock-reader-network")
        .reader(Arc::new(skipped))
        .reader(Arc::new(chosen))
        .reader(Arc::new(shadowed))
        .start();
    let observer = RecordingObserver::new();

    let command = network.load_file("scan.raw", observer.handle());
    assert!(observer.wait_one().is_success());
    assert_eq!(command.reader_name().as_deref(), Some("Chosen"));
    assert_eq!(command.result_as::<u32>().as_deref(), Some(&17));
}

#[test]
fn test_no_reader_reports_failure() {
    let network = TestNetworkBuilder::new("reader-network")
        .reader(Arc::new(TextReader))
        .start();
    let observer = RecordingObserver::new();

    let command = network.load_file("mesh.ply", observer.handle());
    assert!(matches!(observer.wait_one(), Outcome::Failure(_, msg) if msg == "No reader can load mesh.ply"));
    assert!(command.result().is_none());
}

#[test]
fn test_reader_error_reports_failure() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");
    let network = TestNetworkBuilder::new("reader-network")
        .reader(Arc::new(TextReader))
        .start();
    let observer = RecordingObserver::new();

    network.load_file(&missing, observer.handle());
    assert!(matches!(observer.wait_one(), Outcome::Failure(_, msg) if msg.starts_with("Reader 'Text' failed")));
}

#[test]
fn test_loaded_data_flows_through_inject() {
    let mut file = tempfile::Builder::new().suffix(".TXT").tempfile().unwrap();
    write!(file, "42").unwrap();

    let network = TestNetworkBuilder::new("inject-network")
        .reader(Arc::new(TextReader))
        .start();
    let observer = RecordingObserver::new();
    let load = network.load_file(file.path(), observer.handle());
    assert!(observer.wait_one().is_success());

    // Parse the text and hand it to the graph.
    let text = load.result_as::<String>().unwrap();
    let inject = Arc::new(DataInject::<u32>::new("Parsed"));
    inject.inject(Arc::new(text.trim().parse().unwrap()));

    let sink = Sink::new("Sink");
    let (inject_ref, sink_ref): (AlgorithmRef, AlgorithmRef) = (inject.clone(), sink.clone());
    network.add_algorithm(Arc::clone(&inject_ref), None);
    network.add_algorithm(Arc::clone(&sink_ref), None);
    network.connect_algorithms(&inject_ref, "Data", &sink_ref, "Y", None);
    network.run_network(observer.handle());

    assert!(observer.wait_one().is_success());
    assert_eq!(sink.observed(), vec![42]);
    assert_eq!(inject.data().as_deref(), Some(&42));
}
