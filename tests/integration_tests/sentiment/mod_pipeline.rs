use fake::Fake;
use fake::faker::lorem::en::Sentence;
use songbench::sentiment::{GenerateRequest, ListModels, OllamaClient, SentimentOptions, run_sentiment};
use songbench::{CallError, ExternalCall, ToolError};
use std::cell::Cell;
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread;
use tempfile::tempdir;

/// Labels by keyword so the expected tally is known up front.
struct KeywordBackend {
    calls: Cell<usize>,
}

impl ExternalCall<ListModels> for KeywordBackend {
    type Output = Vec<String>;
    fn call(&self, _: &ListModels) -> Result<Vec<String>, CallError> {
        Ok(vec!["mistral:7b".into(), "llama3.1:8b".into()])
    }
}

impl ExternalCall<GenerateRequest> for KeywordBackend {
    type Output = String;
    fn call(&self, req: &GenerateRequest) -> Result<String, CallError> {
        self.calls.set(self.calls.get() + 1);
        let lyric = req
            .prompt
            .split("LETRA:\n")
            .nth(1)
            .and_then(|rest| rest.split("\n\nClassifique").next())
            .unwrap_or_default();
        if lyric.contains("sunshine") {
            Ok("Positiva".into())
        } else if lyric.contains("tears") {
            Ok(" negative.".into())
        } else if lyric.contains("static") {
            Err(CallError::Http("connection reset".into()))
        } else {
            Ok("hmm".into())
        }
    }
}

fn write_dataset(path: &Path, lyrics: &[String]) {
    let mut w = csv::Writer::from_path(path).unwrap();
    w.write_record(["artist", "song", "link", "text"]).unwrap();
    for (i, l) in lyrics.iter().enumerate() {
        w.write_record([format!("Artist {i}"), format!("Song {i}"), format!("/a/{i}"), l.clone()]).unwrap();
    }
    w.flush().unwrap();
}

fn options(root: &Path) -> SentimentOptions {
    SentimentOptions {
        dataset_path: root.join("songs.csv"),
        report_path: root.join("results/sentiment_analysis_results.txt"),
        pacing_ms: 0,
        ..SentimentOptions::default()
    }
}

fn filler() -> String {
    Sentence(8..14).fake()
}

#[test]
fn mixed_dataset_end_to_end() {
    let dir = tempdir().unwrap();
    let opts = SentimentOptions { max_records: 5, ..options(dir.path()) };
    let lyrics = vec![
        format!("<b>sunshine</b>\\n{}", filler()),
        "too short".to_string(),
        format!("tears {}", filler()),
        String::new(),
        format!("static {}", filler()),
        format!("{}\nsunshine again", filler()),
        filler(),
        format!("sunshine {}", filler()),
    ];
    write_dataset(&opts.dataset_path, &lyrics);

    let backend = KeywordBackend { calls: Cell::new(0) };
    let mut out = Vec::new();
    let s = run_sentiment(&backend, &opts, &mut out).unwrap();

    assert_eq!(s.model, "llama3.1:8b");
    assert_eq!(s.processed, 5);
    assert_eq!(s.skipped, 2);
    assert_eq!(s.rows_scanned, 7);
    assert_eq!(backend.calls.get(), 5);
    assert_eq!((s.tally.positive, s.tally.neutral, s.tally.negative), (2, 2, 1));

    let report = fs::read_to_string(s.report_path.unwrap()).unwrap();
    assert!(report.contains("Modelo utilizado: llama3.1:8b\n"));
    assert!(report.contains("Músicas processadas: 5\n"));
    assert!(report.contains("Positiva: 2 músicas (40.0%)\n"));
    assert!(report.contains("Negativa: 1 músicas (20.0%)\n"));
    assert!(report.contains("• Predominância de letras com sentimento POSITIVO"));
    assert!(!report.contains("Alta porcentagem"));

    let console = String::from_utf8(out).unwrap();
    assert!(console.contains("✓ Backend conectado"));
    assert!(console.contains("✓ Resultados salvos em:"));
}

#[test]
fn dataset_shorter_than_limit_processes_everything() {
    let dir = tempdir().unwrap();
    let opts = options(dir.path());
    let lyrics: Vec<String> = (0..3).map(|_| filler()).collect();
    write_dataset(&opts.dataset_path, &lyrics);
    let backend = KeywordBackend { calls: Cell::new(0) };
    let s = run_sentiment(&backend, &opts, &mut std::io::sink()).unwrap();
    assert_eq!(s.processed, 3);
    assert_eq!(s.tally.neutral, 3);
    let report = fs::read_to_string(&opts.report_path).unwrap();
    assert!(report.contains("• Equilíbrio entre sentimentos positivos e negativos"));
    assert!(report.contains("• Alta porcentagem de letras neutras/ambíguas"));
}

#[test]
fn missing_dataset_is_fatal_after_handshake() {
    let dir = tempdir().unwrap();
    let opts = options(dir.path());
    let backend = KeywordBackend { calls: Cell::new(0) };
    let err = run_sentiment(&backend, &opts, &mut std::io::sink()).unwrap_err();
    assert!(matches!(err, ToolError::DatasetNotFound(_)));
    assert!(!opts.report_path.exists());
}

/// Minimal HTTP/1.1 responder for `/api/tags` and `/api/generate`; one request per connection.
fn serve(listener: TcpListener, connections: usize) -> thread::JoinHandle<Vec<String>> {
    thread::spawn(move || {
        let mut bodies = Vec::new();
        for stream in listener.incoming().take(connections) {
            let mut stream = stream.unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();
            let mut content_length = 0usize;
            loop {
                let mut h = String::new();
                reader.read_line(&mut h).unwrap();
                if h == "\r\n" || h.is_empty() {
                    break;
                }
                if let Some(v) = h.to_ascii_lowercase().strip_prefix("content-length:") {
                    content_length = v.trim().parse().unwrap();
                }
            }
            let mut body = vec![0u8; content_length];
            reader.read_exact(&mut body).unwrap();
            bodies.push(String::from_utf8(body).unwrap());
            let payload = if request_line.starts_with("GET /api/tags") {
                r#"{"models":[{"name":"phi3:mini","model":"phi3:mini"},{"name":"llama3:8b","model":"llama3:8b"}]}"#
            } else {
                r#"{"model":"llama3:8b","response":"Negativa","done":true}"#
            };
            write!(
                stream,
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                payload.len(),
                payload
            )
            .unwrap();
        }
        bodies
    })
}

#[test]
fn ollama_client_over_http() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = serve(listener, 3);

    let dir = tempdir().unwrap();
    let mut opts = SentimentOptions { max_records: 2, ..options(dir.path()) };
    opts.backend.url = format!("http://127.0.0.1:{port}/");
    write_dataset(&opts.dataset_path, &[filler(), filler()]);

    let client = OllamaClient::new(&opts.backend).unwrap();
    let s = run_sentiment(&client, &opts, &mut std::io::sink()).unwrap();
    assert_eq!(s.model, "llama3:8b");
    assert_eq!(s.tally.negative, 2);

    let bodies = server.join().unwrap();
    let generate: serde_json::Value = serde_json::from_str(&bodies[1]).unwrap();
    assert_eq!(generate["model"], "llama3:8b");
    assert_eq!(generate["stream"], false);
    assert_eq!(generate["options"]["num_predict"], 5);
    assert!(generate["prompt"].as_str().unwrap().contains("LETRA:"));
}
