// registro-client/tests/query_pipeline.rs
// List queries against the in-memory store

use registro_client::demo::seed_empleados;
use registro_client::listing::{self, ListController};
use registro_client::{DataStore, MemoryStore, QueryPlan};
use shared::models::{Empleado, FilterKey, ListParams, ParamChange, SortPreset};
use std::time::Duration;

fn matches_search(row: &Empleado, term: &str) -> bool {
    let term = term.to_lowercase();
    [
        &row.nombre,
        &row.apellido,
        &row.numero_documento,
        &row.email_personal,
    ]
    .iter()
    .any(|v| v.to_lowercase().contains(&term))
}

#[tokio::test]
async fn test_unfiltered_list_returns_first_page() {
    let store = MemoryStore::with_rows(seed_empleados(45));
    let params = ListParams::default();
    assert!(QueryPlan::from_params(&params).is_unfiltered());

    let result = store.list(&params).await;
    assert!(result.is_ok());
    assert_eq!(result.count, Some(45));
    assert_eq!(result.data.len(), 20);
    // newest first by default
    let created: Vec<_> = result.data.iter().map(|r| r.created_at).collect();
    let mut sorted = created.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(created, sorted);
}

#[tokio::test]
async fn test_search_rows_all_match() {
    let store = MemoryStore::with_rows(seed_empleados(120));
    let params = ListParams::with_page_size(1000).apply(ParamChange::Search("ROJAS".into()));

    let result = store.list(&params).await;
    assert!(result.count.unwrap() > 0);
    assert_eq!(result.count, Some(result.data.len() as u64));
    assert!(result.data.iter().all(|r| matches_search(r, "rojas")));
}

#[tokio::test]
async fn test_filters_and_search_combine() {
    let store = MemoryStore::with_rows(seed_empleados(120));
    let params = ListParams::with_page_size(1000)
        .apply(ParamChange::Search("example.cl".into()))
        .apply(ParamChange::Filter(FilterKey::Sexo, "Femenino".into()))
        .apply(ParamChange::Filter(FilterKey::Salud, "Fonasa".into()));

    let result = store.list(&params).await;
    assert!(!result.data.is_empty());
    for row in &result.data {
        assert_eq!(row.sexo.as_str(), "Femenino");
        assert_eq!(row.salud.as_str(), "Fonasa");
    }
}

#[tokio::test]
async fn test_sentinel_tag_filter_counts_every_untagged_row() {
    let mut rows = seed_empleados(40);
    rows[0].nv = Some("basura".into());
    let untagged = rows.iter().filter(|r| r.project_tag().is_sentinel()).count();
    assert_eq!(untagged, 21);
    let store = MemoryStore::with_rows(rows);

    let params = ListParams::with_page_size(100).apply(ParamChange::Filter(FilterKey::Nv, "NV000".into()));
    let result = store.list(&params).await;
    assert_eq!(result.count, Some(untagged as u64));
    assert!(result.data.iter().all(|r| r.project_tag().is_sentinel()));

    let params = ListParams::with_page_size(100).apply(ParamChange::Filter(FilterKey::Nv, "NV512".into()));
    assert_eq!(store.list(&params).await.count, Some(10));
}

#[tokio::test]
async fn test_name_sort_reverses() {
    let mut rows = seed_empleados(3);
    for (row, nombre) in rows.iter_mut().zip(["Bruno", "Ana", "Carla"]) {
        row.nombre = nombre.to_string();
    }
    let store = MemoryStore::with_rows(rows);

    let asc = ListParams::default().apply(ParamChange::Sort(SortPreset::NameAsc.sort()));
    let desc = ListParams::default().apply(ParamChange::Sort(SortPreset::NameDesc.sort()));
    let asc: Vec<_> = store.list(&asc).await.data.into_iter().map(|r| r.nombre).collect();
    let mut desc: Vec<_> = store.list(&desc).await.data.into_iter().map(|r| r.nombre).collect();

    assert_eq!(asc, ["Ana", "Bruno", "Carla"]);
    desc.reverse();
    assert_eq!(asc, desc);
}

#[tokio::test]
async fn test_second_page_of_45() {
    let rows = seed_empleados(45);
    let expected: Vec<_> = rows[20..40].iter().map(|r| r.id).collect();
    let store = MemoryStore::with_rows(rows);

    let params = ListParams::with_page_size(20)
        .apply(ParamChange::Sort(SortPreset::Oldest.sort()))
        .apply(ParamChange::Page(2));
    let result = store.list(&params).await;

    assert_eq!(result.count, Some(45));
    let ids: Vec<_> = result.data.iter().map(|r| r.id).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_failure_becomes_error_result() {
    let store = MemoryStore::with_rows(seed_empleados(5));
    store.set_failure(Some("connection refused")).await;

    let result = store.list(&ListParams::default()).await;
    assert!(result.data.is_empty());
    assert_eq!(result.count, None);
    assert_eq!(result.error.as_deref(), Some("Invalid response: connection refused"));
}

#[tokio::test(start_paused = true)]
async fn test_controller_ignores_superseded_fetch() {
    let store = MemoryStore::with_rows(seed_empleados(45));
    let mut ctl = ListController::new(ListParams::default());

    let slow = ctl
        .change(ParamChange::Filter(FilterKey::Sexo, "Masculino".into()))
        .unwrap();
    let fast = ctl
        .change(ParamChange::Filter(FilterKey::Sexo, "Femenino".into()))
        .unwrap();

    store.set_latency(Some(Duration::from_millis(50))).await;
    let fast_done = listing::fetch(&store, fast).await;
    let slow_done = listing::fetch(&store, slow).await;

    assert!(ctl.complete(&fast_done.0, fast_done.1));
    // the older request lands last and must not overwrite the table
    assert!(!ctl.complete(&slow_done.0, slow_done.1));
    assert!(ctl.rows().iter().all(|r| r.sexo.as_str() == "Femenino"));
    assert!(!ctl.loading());
}

#[tokio::test(start_paused = true)]
async fn test_controller_debounced_search_fetches_once() {
    let store = MemoryStore::with_rows(seed_empleados(60));
    let mut ctl = ListController::new(ListParams::default());

    for prefix in ["s", "so", "sot", "soto"] {
        ctl.type_search(prefix);
        tokio::time::advance(Duration::from_millis(100)).await;
        assert_eq!(ctl.tick(), None);
    }
    tokio::time::advance(listing::SEARCH_DEBOUNCE).await;
    let params = ctl.tick().expect("search commits after the window");
    assert_eq!(params.search, "soto");

    let (issued, result) = listing::fetch(&store, params).await;
    assert!(ctl.complete(&issued, result));
    assert!(!ctl.rows().is_empty());
    assert!(ctl.rows().iter().all(|r| matches_search(r, "soto")));
}
