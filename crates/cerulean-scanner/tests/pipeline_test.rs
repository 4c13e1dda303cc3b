use async_trait::async_trait;
use cerulean_core::{CleanName, TargetOrganization};
use cerulean_scanner::{LineSink, ScanError, ScanPipeline, StopReason};
use cerulean_search::{SearchError, SearchItem, SearchPage, SearchProvider, SearchRequest};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the mock returns for one call.
#[derive(Clone)]
enum Reply {
    Page(Vec<&'static str>),
    Fail,
    Hang,
}

/// Provider replaying a fixed script and recording each start offset.
struct MockProvider {
    script: Vec<Reply>,
    fallback: Reply,
    starts: Mutex<Vec<u32>>,
}

impl MockProvider {
    fn new(script: Vec<Reply>) -> Self {
        Self {
            script,
            fallback: Reply::Page(Vec::new()),
            starts: Mutex::new(Vec::new()),
        }
    }

    fn repeating(reply: Reply) -> Self {
        Self {
            script: Vec::new(),
            fallback: reply,
            starts: Mutex::new(Vec::new()),
        }
    }

    fn starts(&self) -> Vec<u32> {
        self.starts.lock().expect("starts lock").clone()
    }
}

#[async_trait]
impl SearchProvider for MockProvider {
    async fn search(&self, request: &SearchRequest) -> cerulean_search::Result<SearchPage> {
        let reply = {
            let mut starts = self.starts.lock().expect("starts lock");
            let call = starts.len();
            starts.push(request.start);
            self.script.get(call).unwrap_or(&self.fallback).clone()
        };

        match reply {
            Reply::Page(titles) => Ok(SearchPage::from_items(
                titles.into_iter().map(SearchItem::titled).collect(),
            )),
            Reply::Fail => Err(SearchError::RateLimitExceeded {
                provider: "mock".to_string(),
                message: "quota exhausted".to_string(),
            }),
            Reply::Hang => std::future::pending().await,
        }
    }

    fn provider_id(&self) -> &'static str {
        "mock"
    }
}

fn full_page(prefix: &'static str) -> Vec<&'static str> {
    let names: &'static [&'static str] = match prefix {
        "a" => &[
            "Ada Lovelace - Engineer - Acme | LinkedIn",
            "Alan Turing - Researcher - Acme | LinkedIn",
            "Anita Borg - Director - Acme | LinkedIn",
            "Adele Goldberg - Architect - Acme | LinkedIn",
            "Alonzo Church - Fellow - Acme | LinkedIn",
            "Annie Easley - Analyst - Acme | LinkedIn",
            "Andrew Tanenbaum - Professor - Acme | LinkedIn",
            "Abraham Lempel - Scientist - Acme | LinkedIn",
            "Adi Shamir - Cryptographer - Acme | LinkedIn",
            "Acme Corp | LinkedIn",
        ],
        "b" => &[
            "Barbara Liskov - Engineer - Acme | LinkedIn",
            "Bjarne Stroustrup - Designer - Acme | LinkedIn",
            "Brian Kernighan - Author - Acme | LinkedIn",
            "Butler Lampson - Fellow - Acme | LinkedIn",
            "Bertrand Meyer - Professor - Acme | LinkedIn",
            "Bill Joy - Founder - Acme | LinkedIn",
            "Bob Metcalfe - Engineer - Acme | LinkedIn",
            "Brendan Eich - CTO - Acme | LinkedIn",
            "Bram Moolenaar - Developer - Acme | LinkedIn",
            "Betty Holberton - Programmer - Acme | LinkedIn",
        ],
        _ => &[
            "Claude Shannon - Researcher - Acme | LinkedIn",
            "Charles Babbage - Inventor - Acme | LinkedIn",
            "Cynthia Dwork - Scientist - Acme | LinkedIn",
            "Carl Adam Petri - Fellow - Acme | LinkedIn",
            "Corrado Bohm - Professor - Acme | LinkedIn",
            "Chuck Moore - Engineer - Acme | LinkedIn",
            "Cliff Click - Engineer - Acme | LinkedIn",
            "Carol Shaw - Designer - Acme | LinkedIn",
            "Cleve Moler - Founder - Acme | LinkedIn",
            "Christopher Strachey - Lecturer - Acme | LinkedIn",
        ],
    };
    names.to_vec()
}

fn target() -> TargetOrganization {
    TargetOrganization::new("Acme").expect("valid target")
}

fn assert_unique(names: &[CleanName]) {
    let distinct: HashSet<_> = names.iter().collect();
    assert_eq!(distinct.len(), names.len(), "duplicate name emitted");
}

#[tokio::test]
async fn test_short_page_ends_fetching() {
    let provider = Arc::new(MockProvider::new(vec![
        Reply::Page(full_page("a")),
        Reply::Page(full_page("b")),
        Reply::Page(vec!["Grace Hopper - Admiral - Acme | LinkedIn"]),
        Reply::Page(full_page("c")),
    ]));

    let (report, names) = ScanPipeline::new(provider.clone())
        .with_threads(4)
        .run(&target(), Vec::new())
        .await
        .expect("pipeline run");

    assert_eq!(provider.starts(), vec![1, 11, 21]);
    assert_eq!(report.fetch.stop_reason, StopReason::LastPage);
    assert_eq!(report.fetch.titles_enqueued, 21);
    assert_eq!(report.workers.processed, 21);
    assert_eq!(report.workers.rejected, 1);
    assert_eq!(names.len(), 20);
    assert!(names.contains(&CleanName::from("Grace Hopper")));
    assert_unique(&names);
}

#[tokio::test]
async fn test_page_limit_caps_requests() {
    let provider = Arc::new(MockProvider::repeating(Reply::Page(full_page("a"))));

    let (report, names) = ScanPipeline::new(provider.clone())
        .with_threads(3)
        .with_page_limit(2)
        .run(&target(), Vec::new())
        .await
        .expect("pipeline run");

    assert_eq!(provider.starts(), vec![1, 11]);
    assert_eq!(report.fetch.pages_fetched, 2);
    assert_eq!(report.fetch.stop_reason, StopReason::PageLimit);
    // Same nine names on both pages
    assert_eq!(names.len(), 9);
    assert_eq!(report.aggregate.duplicates, 9);
}

#[tokio::test]
async fn test_empty_first_page_terminates_for_any_pool_size() {
    for threads in [1, 2, 8, 50] {
        let provider = Arc::new(MockProvider::new(Vec::new()));

        let (report, names) = ScanPipeline::new(provider.clone())
            .with_threads(threads)
            .run(&target(), Vec::new())
            .await
            .expect("pipeline run");

        assert!(names.is_empty());
        assert_eq!(provider.starts(), vec![1]);
        assert_eq!(report.fetch.stop_reason, StopReason::Exhausted);
        assert_eq!(report.worker_count, threads);
    }
}

#[tokio::test]
async fn test_provider_error_keeps_queued_names() {
    let provider = Arc::new(MockProvider::new(vec![
        Reply::Page(full_page("a")),
        Reply::Fail,
        Reply::Page(full_page("b")),
    ]));

    let (report, names) = ScanPipeline::new(provider.clone())
        .with_threads(2)
        .with_page_limit(5)
        .run(&target(), Vec::new())
        .await
        .expect("provider failure is not a pipeline error");

    assert_eq!(provider.starts(), vec![1, 11]);
    assert_eq!(report.fetch.stop_reason, StopReason::ProviderError);
    assert!(report.fetch.error.is_some());
    assert_eq!(names.len(), 9);
    assert!(names.contains(&CleanName::from("Ada Lovelace")));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_heavy_duplication_across_workers() {
    let provider = Arc::new(MockProvider::new(vec![
        Reply::Page(full_page("a")),
        Reply::Page(full_page("b")),
        Reply::Page(full_page("a")),
        Reply::Page(full_page("b")),
        Reply::Page(full_page("a")),
        Reply::Page(full_page("c")),
        Reply::Page(full_page("b")),
    ]));

    let (report, names) = ScanPipeline::new(provider)
        .with_threads(16)
        .with_page_limit(7)
        .run(&target(), Vec::new())
        .await
        .expect("pipeline run");

    assert_unique(&names);
    assert_eq!(names.len(), 29);
    assert_eq!(report.aggregate.received, 9 * 3 + 10 * 4);
    assert_eq!(report.aggregate.emitted, 29);
}

#[tokio::test]
async fn test_capacity_one_loses_nothing() {
    let provider = Arc::new(MockProvider::new(vec![
        Reply::Page(full_page("a")),
        Reply::Page(full_page("b")),
        Reply::Page(full_page("c")),
    ]));

    let (report, names) = ScanPipeline::new(provider)
        .with_threads(1)
        .with_page_limit(3)
        .with_queue_capacity(1)
        .run(&target(), Vec::new())
        .await
        .expect("pipeline run");

    assert_eq!(report.fetch.titles_enqueued, 30);
    assert_eq!(report.workers.processed, 30);
    assert_eq!(names.len(), 29);
}

#[tokio::test]
async fn test_cancellation_stops_hung_fetch() {
    let provider = Arc::new(MockProvider::new(vec![
        Reply::Page(full_page("a")),
        Reply::Hang,
    ]));
    let pipeline = ScanPipeline::new(provider).with_threads(2);
    let cancel = pipeline.cancel_token();

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
    });

    let (report, names) = tokio::time::timeout(
        Duration::from_secs(5),
        pipeline.run(&target(), Vec::new()),
    )
    .await
    .expect("pipeline terminates after cancellation")
    .expect("pipeline run");
    canceller.await.expect("canceller task");

    assert_eq!(report.fetch.stop_reason, StopReason::Cancelled);
    assert_eq!(report.fetch.pages_fetched, 1);
    // Titles queued before cancellation are still processed
    assert_eq!(names.len(), 9);
}

#[tokio::test]
async fn test_line_sink_output() {
    let provider = Arc::new(MockProvider::new(vec![Reply::Page(vec![
        "Jane Doe - Engineer - Acme | LinkedIn",
        "Jane Doe - Manager - Acme | LinkedIn",
        "Acme Corp | LinkedIn",
    ])]));

    let (_report, sink) = ScanPipeline::new(provider)
        .with_threads(2)
        .run(&target(), LineSink::new(Vec::new()))
        .await
        .expect("pipeline run");

    let output = String::from_utf8(sink.into_inner()).expect("utf8 output");
    assert_eq!(output, "Jane Doe\n");
}

#[tokio::test]
async fn test_stream_yields_names_then_report() {
    let provider = Arc::new(MockProvider::new(vec![Reply::Page(vec![
        "Jane Doe - Engineer - Acme | LinkedIn",
        "John Roe - Analyst - Acme | LinkedIn",
    ])]));

    let mut stream = ScanPipeline::new(provider).with_threads(2).stream(&target());

    let mut names = Vec::new();
    while let Some(name) = stream.names.recv().await {
        names.push(name.into_inner());
    }
    names.sort();

    let report = stream
        .handle
        .await
        .expect("pipeline task")
        .expect("pipeline run");

    assert_eq!(names, vec!["Jane Doe", "John Roe"]);
    assert_eq!(report.unique_names(), 2);
}

#[tokio::test]
async fn test_zero_queue_capacity_rejected() {
    let provider = Arc::new(MockProvider::new(Vec::new()));

    let result = ScanPipeline::new(provider.clone())
        .with_queue_capacity(0)
        .run(&target(), Vec::new())
        .await;

    assert!(matches!(result, Err(ScanError::InvalidConfig(_))));
    assert!(provider.starts().is_empty());
}
