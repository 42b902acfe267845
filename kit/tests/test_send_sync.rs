fn assert_send<T: Send>() {}
fn assert_sync<T: Sync>() {}

#[test]
fn tokenizer_is_send_sync() {
    // This will fail to compile if Tokenizer isn't Send + Sync
    assert_send::<lexi::Tokenizer>();
    assert_sync::<lexi::Tokenizer>();
    assert_send::<lexi::OwnedToken>();
    assert_sync::<lexi::Token<'static>>();
}
