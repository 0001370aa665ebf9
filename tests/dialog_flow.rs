//! End-to-end dialog flows against the in-memory connector.

use std::rc::Rc;

use webfm::{
    ConfigError, Connector, DialogData, DialogError, DialogService, FmConfig, FmItem, Manifest,
    MemoryConnector, NativeFile, PickMode, ReadError,
};

fn create_service() -> (Rc<MemoryConnector>, DialogService) {
    let manifest: Manifest = serde_json::from_str(
        r#"{
            "files": [
                {"path": "home/photos/cat.png", "size": 2048, "type": "image/png"},
                {"path": "home/photos/dog.jpg", "size": 1048576, "type": "image/jpeg"},
                {"path": "home/notes.txt", "size": 12, "type": "text/plain"}
            ],
            "folders": ["home/inbox"]
        }"#,
    )
    .unwrap();
    let connector = Rc::new(MemoryConnector::from_manifest(&manifest));
    let service = DialogService::new(connector.clone());
    (connector, service)
}

#[tokio::test]
async fn test_open_without_root_fails() {
    let (_, service) = create_service();
    let data = DialogData {
        path: Some(vec![]),
        ..Default::default()
    };
    let err = service.open(data).await.err();
    assert_eq!(err, Some(DialogError::Config(ConfigError::MissingRoot)));
}

#[tokio::test]
async fn test_pick_file_after_navigation() {
    let (_, service) = create_service();
    let mut session = service
        .open(DialogData::new(Vec::<String>::new(), ["home"]).with_pick(PickMode::File))
        .await
        .unwrap();
    assert_eq!(session.dialog().title(), "File Browser");

    session.enter("photos").await.unwrap();
    assert_eq!(session.dialog().path(), ["photos"]);
    assert_eq!(session.dialog().root(), ["home"]);

    assert!(matches!(
        session.pickable("missing.png"),
        Err(DialogError::NotPickable(_))
    ));

    let picked = session.pick("dog.jpg").unwrap().into_item().unwrap();
    let FmItem::File(dog) = picked else {
        panic!("expected a file");
    };
    assert_eq!(dog.full_path(), ["home", "photos", "dog.jpg"]);
    assert_eq!(dog.human_size().to_string(), "1 MB");
    assert_eq!(dog.thumbnail(), Some("memory://home/photos/dog.jpg"));

    // Listed files carry no native handle
    assert!(matches!(
        dog.read_text().await,
        Err(ReadError::Unreadable { .. })
    ));
}

#[tokio::test]
async fn test_pick_current_folder() {
    let (_, service) = create_service();
    let mut session = service
        .open(DialogData::new(["photos"], ["home"]).with_pick(PickMode::Folder))
        .await
        .unwrap();

    assert!(session.pickable("cat.png").is_err());
    assert!(session.up().await.unwrap());
    session.enter("inbox").await.unwrap();

    let picked = session.pick_current().unwrap().into_item().unwrap();
    assert_eq!(picked.full_path(), ["home", "inbox"]);
}

#[tokio::test]
async fn test_upload_then_pick() {
    let (connector, service) = create_service();
    let mut session = service
        .open(DialogData::new(["inbox"], ["home"]).with_pick(PickMode::File))
        .await
        .unwrap();

    let summary = session
        .browser_mut()
        .upload(vec![NativeFile::from_bytes(
            "report.csv",
            "text/csv",
            b"a,b\n1,2\n".to_vec(),
        )])
        .await
        .unwrap();
    assert_eq!(summary.uploaded, 1);

    let picked = session.pick("report.csv").unwrap().into_item().unwrap();
    assert_eq!(
        connector.file_bytes(picked.full_path()),
        Some(b"a,b\n1,2\n".to_vec())
    );
}

#[tokio::test]
async fn test_service_config_applies() {
    let (connector, _) = create_service();
    let service = DialogService::new(connector.clone()).with_config(FmConfig::read_only());
    let mut session = service
        .open(DialogData::new(Vec::<String>::new(), ["home"]))
        .await
        .unwrap();
    assert!(session.browser_mut().create_folder("x").await.is_err());

    // Per-dialog config wins over the service default
    let mut session = service
        .open(DialogData::new(Vec::<String>::new(), ["home"]).with_config(FmConfig::default()))
        .await
        .unwrap();
    session.browser_mut().create_folder("x").await.unwrap();
    assert!(
        connector
            .list(session.browser().folder())
            .await
            .unwrap()
            .iter()
            .any(|i| i.name() == "x")
    );
    assert!(session.dismiss().into_item().is_none());
}
