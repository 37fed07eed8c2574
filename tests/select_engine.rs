use std::sync::Arc;

use djreq_admin::alerts::{Level, NoticeLog};
use djreq_admin::domain::group::Group;
use djreq_admin::domain::package::{Package, RequestKind};
use djreq_admin::domain::types::PackageId;
use djreq_admin::engine::{AsyncMultiSelect, AsyncSelect, Choice, OptionEntry};
use djreq_admin::forms::group::{GroupForm, MAX_GROUP_PACKAGES, package_chip_label};
use djreq_admin::services::groups::save_group;

mod common;

use common::InMemoryApi;

fn package(id: i32, tip: f64) -> Package {
    Package {
        id: PackageId::new(id).unwrap(),
        name: format!("Paquete {id}"),
        kind: RequestKind::Song,
        tip: Some(tip),
        is_optional_tip: false,
        is_active: true,
    }
}

fn labels<T: djreq_admin::engine::SelectItem>(entries: &[OptionEntry<T>]) -> Vec<String> {
    entries.iter().map(|e| e.label().to_string()).collect()
}

#[tokio::test]
async fn group_select_pages_through_the_api() {
    let api = Arc::new(InMemoryApi::with_groups(25));
    let select = AsyncSelect::<Group, InMemoryApi>::new(Arc::clone(&api));

    select.open().await.unwrap();
    let entries = select.entries();
    assert_eq!(entries.len(), 11);
    assert!(entries[10].is_load_more());

    select.choose(&entries[10]).await.unwrap();
    let entries = select.entries();
    assert_eq!(entries.len(), 21);
    assert_eq!(entries[10].label(), "Grupo 11");
    assert!(entries[20].is_load_more());

    select.choose(&entries[20]).await.unwrap();
    let entries = select.entries();
    assert_eq!(entries.len(), 25);
    assert!(!entries.iter().any(OptionEntry::is_load_more));
    assert_eq!(api.list_calls(), 3);
}

#[tokio::test]
async fn reload_picks_up_a_group_created_elsewhere() {
    let api = Arc::new(InMemoryApi::with_groups(2));
    api.packages.lock().push(package(1, 50.0));
    let select = AsyncSelect::<Group, InMemoryApi>::new(Arc::clone(&api));
    select.open().await.unwrap();
    assert_eq!(labels(&select.entries()), vec!["Grupo 01", "Grupo 02"]);

    let notices = NoticeLog::default();
    save_group(
        api.as_ref(),
        &notices,
        None,
        GroupForm {
            name: "Quinceañeras".to_string(),
            packages: vec![package(1, 50.0)],
        },
    )
    .await
    .unwrap();
    select.reload().await.unwrap();

    assert_eq!(
        labels(&select.entries()),
        vec!["Grupo 01", "Grupo 02", "Quinceañeras"]
    );
    assert_eq!(notices.notices()[0].message, "Grupo registrado con éxito");
}

#[tokio::test]
async fn package_multi_select_caps_the_group_size() {
    let api = Arc::new(InMemoryApi::default());
    for id in 1..=6 {
        api.packages.lock().push(package(id, 10.0 * id as f64));
    }
    let notices = Arc::new(NoticeLog::default());
    let select = AsyncMultiSelect::<Package, InMemoryApi>::new(Arc::clone(&api), notices.clone())
        .with_max_selections(MAX_GROUP_PACKAGES)
        .with_chip_label(package_chip_label);

    select.open().await.unwrap();
    let entries = select.entries();
    for entry in &entries[..5] {
        assert_eq!(select.choose(entry).await.unwrap(), Choice::Added);
    }
    let writes_before = api.write_calls();

    assert_eq!(select.choose(&entries[5]).await.unwrap(), Choice::Rejected);
    assert_eq!(select.selected().len(), 5);
    assert_eq!(api.write_calls(), writes_before);

    let notice = &notices.notices()[0];
    assert_eq!(notice.level, Level::Info);
    assert_eq!(notice.message, "Solo se pueden agregar un máximo de 5 elementos");
    assert_eq!(select.chips()[0].label, "Paquete 1 - $10.00");
}
