use std::cell::RefCell;
use std::rc::Rc;

use modal_engine::traits::Clipboard;

/// Clipboard whose content stays inspectable after the engine takes ownership.
#[derive(Default, Debug, Clone)]
pub struct MockClipboard {
    content: Rc<RefCell<Option<String>>>,
}

impl MockClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> Option<String> {
        self.content.borrow().clone()
    }

    pub fn put(&self, text: &str) {
        *self.content.borrow_mut() = Some(text.to_string());
    }
}

impl Clipboard for MockClipboard {
    fn get(&mut self) -> Option<String> {
        self.content.borrow().clone()
    }

    fn set(&mut self, text: String) {
        *self.content.borrow_mut() = Some(text);
    }
}
