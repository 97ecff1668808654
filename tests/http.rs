use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Task {
    id: String,
    title: String,
    date: String,
    priority: String,
    description: String,
    done: bool,
    created_at: i64,
}

#[derive(Debug, Deserialize)]
struct Note {
    id: String,
    title: String,
    body: String,
}

#[derive(Debug, Deserialize)]
struct Kpis {
    today: usize,
    done: usize,
    active: usize,
}

#[derive(Debug, Deserialize)]
struct ThemeBody {
    theme: String,
}

struct TestServer {
    base_url: String,
    data_dir: PathBuf,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::Once;
    use std::sync::atomic::{AtomicI32, Ordering};

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_dir() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("taskboard_http_{}_{}", std::process::id(), nanos));
    path
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/kpis")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(data_dir: PathBuf) -> TestServer {
    let port = pick_free_port();
    // An unroutable quote endpoint so tests never leave the machine.
    let child = Command::new(env!("CARGO_BIN_EXE_taskboard"))
        .env("PORT", port.to_string())
        .env("APP_DATA_DIR", &data_dir)
        .env("QUOTE_API_URL", "http://127.0.0.1:9/random")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer {
        base_url,
        data_dir,
        child,
    }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server(unique_data_dir()).await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn post_task(client: &Client, base_url: &str, body: serde_json::Value) -> Task {
    let response = client
        .post(format!("{base_url}/api/tasks"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

async fn get_tasks(client: &Client, base_url: &str, query: &str) -> Vec<Task> {
    client
        .get(format!("{base_url}/api/tasks{query}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn get_kpis(client: &Client, base_url: &str) -> Kpis {
    client
        .get(format!("{base_url}/api/kpis"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_add_task_creates_pending_entry_with_fresh_id() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = get_tasks(&client, &server.base_url, "").await;
    let task = post_task(
        &client,
        &server.base_url,
        serde_json::json!({ "title": "Buy milk", "priority": "low" }),
    )
    .await;

    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.priority, "low");
    assert_eq!(task.date, "");
    assert_eq!(task.description, "");
    assert!(!task.done);
    assert!(task.created_at > 0);
    assert!(before.iter().all(|t| t.id != task.id));

    let after = get_tasks(&client, &server.base_url, "").await;
    assert_eq!(after.len(), before.len() + 1);
}

#[tokio::test]
async fn http_add_task_rejects_blank_title_and_unknown_priority() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let blank = client
        .post(format!("{}/api/tasks", server.base_url))
        .json(&serde_json::json!({ "title": "   ", "priority": "low" }))
        .send()
        .await
        .unwrap();
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);

    let bogus = client
        .post(format!("{}/api/tasks", server.base_url))
        .json(&serde_json::json!({ "title": "ok", "priority": "urgent" }))
        .send()
        .await
        .unwrap();
    assert!(bogus.status().is_client_error());
}

#[tokio::test]
async fn http_toggle_twice_restores_done_flag() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let task = post_task(
        &client,
        &server.base_url,
        serde_json::json!({ "title": "toggle me", "priority": "medium" }),
    )
    .await;

    for expected_done in [true, false] {
        let response = client
            .post(format!("{}/api/tasks/{}/toggle", server.base_url, task.id))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());

        let tasks = get_tasks(&client, &server.base_url, "").await;
        let found = tasks.iter().find(|t| t.id == task.id).unwrap();
        assert_eq!(found.done, expected_done);
    }
}

#[tokio::test]
async fn http_filters_combine_status_priority_and_search() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let marker = format!("fltr{}", std::process::id());
    let done_task = post_task(
        &client,
        &server.base_url,
        serde_json::json!({ "title": format!("{marker} HIGH done"), "priority": "high" }),
    )
    .await;
    post_task(
        &client,
        &server.base_url,
        serde_json::json!({ "title": format!("{marker} high pending"), "priority": "high" }),
    )
    .await;
    post_task(
        &client,
        &server.base_url,
        serde_json::json!({ "title": "unrelated", "priority": "low", "description": format!("mentions {marker}") }),
    )
    .await;

    client
        .post(format!("{}/api/tasks/{}/toggle", server.base_url, done_task.id))
        .send()
        .await
        .unwrap();

    let found = get_tasks(&client, &server.base_url, &format!("?q={marker}")).await;
    assert_eq!(found.len(), 3);

    let found = get_tasks(
        &client,
        &server.base_url,
        &format!("?q={marker}&priority=high"),
    )
    .await;
    assert_eq!(found.len(), 2);

    let found = get_tasks(
        &client,
        &server.base_url,
        &format!("?q={marker}&priority=high&status=done"),
    )
    .await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, done_task.id);
    assert!(found.iter().all(|t| t.done));

    let upper = marker.to_uppercase();
    let found = get_tasks(&client, &server.base_url, &format!("?q={upper}")).await;
    assert_eq!(found.len(), 3);
}

#[tokio::test]
async fn http_edit_patches_only_present_fields() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let task = post_task(
        &client,
        &server.base_url,
        serde_json::json!({
            "title": "original",
            "priority": "low",
            "description": "keep this"
        }),
    )
    .await;

    let response = client
        .patch(format!("{}/api/tasks/{}", server.base_url, task.id))
        .json(&serde_json::json!({ "title": "renamed", "priority": "high" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let tasks = get_tasks(&client, &server.base_url, "").await;
    let found = tasks.iter().find(|t| t.id == task.id).unwrap();
    assert_eq!(found.title, "renamed");
    assert_eq!(found.priority, "high");
    assert_eq!(found.description, "keep this");
    assert_eq!(found.created_at, task.created_at);
    assert!(!found.done);
}

#[tokio::test]
async fn http_delete_removes_one_and_preserves_order() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let first = post_task(
        &client,
        &server.base_url,
        serde_json::json!({ "title": "del a", "priority": "low" }),
    )
    .await;
    let second = post_task(
        &client,
        &server.base_url,
        serde_json::json!({ "title": "del b", "priority": "low" }),
    )
    .await;
    let third = post_task(
        &client,
        &server.base_url,
        serde_json::json!({ "title": "del c", "priority": "low" }),
    )
    .await;

    let before = get_tasks(&client, &server.base_url, "").await;
    let response = client
        .delete(format!("{}/api/tasks/{}", server.base_url, second.id))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let after = get_tasks(&client, &server.base_url, "").await;
    assert_eq!(after.len(), before.len() - 1);
    assert!(after.iter().all(|t| t.id != second.id));

    let pos_first = after.iter().position(|t| t.id == first.id).unwrap();
    let pos_third = after.iter().position(|t| t.id == third.id).unwrap();
    assert!(pos_first < pos_third);

    // Deleting again is a silent no-op.
    let response = client
        .delete(format!("{}/api/tasks/{}", server.base_url, second.id))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        get_tasks(&client, &server.base_url, "").await.len(),
        after.len()
    );
}

#[tokio::test]
async fn http_kpi_active_equals_total_minus_done() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    post_task(
        &client,
        &server.base_url,
        serde_json::json!({ "title": "kpi task", "priority": "medium" }),
    )
    .await;

    let kpis = get_kpis(&client, &server.base_url).await;
    let tasks = get_tasks(&client, &server.base_url, "").await;
    let done = tasks.iter().filter(|t| t.done).count();

    assert_eq!(kpis.done, done);
    assert_eq!(kpis.active, tasks.len() - done);
    assert!(kpis.today <= tasks.len());
}

#[tokio::test]
async fn http_notes_add_list_delete() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/notes", server.base_url))
        .json(&serde_json::json!({ "title": "Shopping", "body": "eggs, bread" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let note: Note = response.json().await.unwrap();
    assert_eq!(note.title, "Shopping");
    assert_eq!(note.body, "eggs, bread");

    let notes: Vec<Note> = client
        .get(format!("{}/api/notes", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(notes.iter().any(|n| n.id == note.id));

    let response = client
        .delete(format!("{}/api/notes/{}", server.base_url, note.id))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let notes: Vec<Note> = client
        .get(format!("{}/api/notes", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(notes.iter().all(|n| n.id != note.id));
}

#[tokio::test]
async fn http_theme_round_trips() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .put(format!("{}/api/theme", server.base_url))
        .json(&serde_json::json!({ "theme": "dark" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let theme: ThemeBody = client
        .get(format!("{}/api/theme", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(theme.theme, "dark");

    let page = client
        .get(&server.base_url)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains(r#"class="dark""#));
}

#[tokio::test]
async fn http_quote_failure_reports_error_text() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/quote", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(!response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn http_malformed_store_file_degrades_to_empty_list() {
    let _guard = TEST_LOCK.lock().await;

    let data_dir = unique_data_dir();
    std::fs::create_dir_all(&data_dir).unwrap();
    std::fs::write(data_dir.join("tasks.json"), "{definitely not json").unwrap();

    let server = spawn_server(data_dir).await;
    let client = Client::new();

    let tasks = get_tasks(&client, &server.base_url, "").await;
    assert!(tasks.is_empty());

    // Mutations still work and re-establish a valid file.
    post_task(
        &client,
        &server.base_url,
        serde_json::json!({ "title": "recovered", "priority": "medium" }),
    )
    .await;
    let raw = std::fs::read_to_string(server.data_dir.join("tasks.json")).unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&raw).is_ok());
}
