use super::ObjectStore;

#[test]
fn it_creates_and_resolves_blobs() {
    let url = ObjectStore::create(vec![1, 2, 3]);

    assert!(ObjectStore::is_managed(&url));
    assert_eq!(ObjectStore::resolve(&url), Some(vec![1, 2, 3]));

    ObjectStore::release(&url);
}

#[test]
fn it_releases_blobs_exactly_once() {
    let url = ObjectStore::create(vec![42]);

    assert!(ObjectStore::release(&url));
    assert_eq!(ObjectStore::resolve(&url), None);
    assert!(!ObjectStore::release(&url));
}

#[test]
fn it_creates_unique_urls() {
    let first = ObjectStore::create(vec![]);
    let second = ObjectStore::create(vec![]);

    assert_ne!(first, second);

    ObjectStore::release(&first);
    ObjectStore::release(&second);
}

#[test]
fn it_does_not_manage_remote_urls() {
    assert!(!ObjectStore::is_managed("https://example.com/page-1.png"));
    assert!(!ObjectStore::release("https://example.com/page-1.png"));
}
