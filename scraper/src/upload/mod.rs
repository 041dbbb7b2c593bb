//! Publishing issue records as new books on Goodreads.

mod webdriver;

pub use webdriver::{WebDriver, DEFAULT_WEBDRIVER_URL};

use log::{info, warn};

use crate::error::UploadError;
use crate::novel::NovelRecord;

pub const UPLOAD_URL: &str = "https://www.goodreads.com/book/new";
pub const LOGIN_URL: &str = "https://www.goodreads.com/user/sign_in";

const BOOK_FORMAT: &str = "ebook";
const BOOK_LANGUAGE: &str = "ger";

/// The handful of browser operations the uploader needs.
pub trait Browser {
    type Element;

    fn goto(&mut self, url: &str) -> Result<(), UploadError>;
    fn title(&mut self) -> Result<String, UploadError>;
    fn find_all(&mut self, xpath: &str) -> Result<Vec<Self::Element>, UploadError>;
    fn send_keys(&mut self, element: &Self::Element, text: &str) -> Result<(), UploadError>;
    fn click(&mut self, element: &Self::Element) -> Result<(), UploadError>;
}

/// Something that can publish a single issue record.
pub trait Publisher {
    fn publish(&mut self, page: &NovelRecord) -> Result<(), UploadError>;
}

/// Values entered into the Goodreads "new book" form, keyed by control id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookForm {
    pub inputs: Vec<(&'static str, String)>,
    pub selects: Vec<(&'static str, String)>,
    pub textareas: Vec<(&'static str, String)>,
}

impl BookForm {
    /// Absent optional values are left out so their controls stay untouched.
    pub fn for_page(page: &NovelRecord) -> BookForm {
        use chrono::Datelike;

        let date = page.publish_date;
        let inputs = [
            ("book_title", Some(page.title.clone())),
            ("book_sort_by_title", Some(page.title.clone())),
            ("author_name", page.author.clone()),
            ("book_publisher", Some(page.publisher.clone())),
            ("book_publication_year", date.map(|d| d.year().to_string())),
        ];
        let selects = [
            ("book_publication_month", date.map(|d| d.month().to_string())),
            ("book_publication_day", date.map(|d| d.day().to_string())),
            ("book_format", Some(BOOK_FORMAT.to_string())),
            ("book_language_code", Some(BOOK_LANGUAGE.to_string())),
        ];
        let textareas = [("book_description_defaulted", page.synopsis.clone())];

        BookForm {
            inputs: present(inputs),
            selects: present(selects),
            textareas: present(textareas),
        }
    }
}

fn present<const N: usize>(
    fields: [(&'static str, Option<String>); N],
) -> Vec<(&'static str, String)> {
    fields
        .into_iter()
        .filter_map(|(id, value)| value.filter(|v| !v.is_empty()).map(|v| (id, v)))
        .collect()
}

pub struct Uploader<B: Browser> {
    browser: B,
}

impl<B: Browser> Uploader<B> {
    pub fn new(browser: B) -> Self {
        Uploader { browser }
    }

    pub fn login(&mut self, account: &str, password: &str) -> Result<(), UploadError> {
        self.browser.goto(LOGIN_URL)?;
        info!("{}", self.browser.title()?);

        let email_field = self.find_element(r#"//form[@name="sign_in"]//input[@id="user_email"]"#)?;
        self.browser.send_keys(&email_field, account)?;
        let password_field =
            self.find_element(r#"//form[@name="sign_in"]//input[@id="user_password"]"#)?;
        self.browser.send_keys(&password_field, password)?;
        let submit_button = self.find_element(
            r#"//form[@name="sign_in"]//input[@name="next" and @type="submit"]"#,
        )?;
        self.browser.click(&submit_button)?;

        info!("{}", self.browser.title()?);
        Ok(())
    }

    /// Publish every page not on Goodreads yet. A page that fails is logged
    /// and skipped. Returns the pages that were published.
    pub fn upload<'a>(&mut self, pages: &'a [NovelRecord]) -> Vec<&'a NovelRecord> {
        let mut uploaded = Vec::new();
        for page in pages {
            if self.exists_on_goodreads(page) {
                continue;
            }
            match self.publish(page) {
                Ok(()) => uploaded.push(page),
                Err(err) => warn!("skipping issue {}: {}", page.number, err),
            }
        }
        uploaded
    }

    // TODO: search Goodreads by title before creating a duplicate book.
    fn exists_on_goodreads(&self, _page: &NovelRecord) -> bool {
        false
    }

    fn upload_page(&mut self, page: &NovelRecord) -> Result<(), UploadError> {
        self.browser.goto(UPLOAD_URL)?;
        info!("{}", self.browser.title()?);

        let form = BookForm::for_page(page);
        for (field_id, value) in &form.inputs {
            let field =
                self.find_element(&format!(r#"//form[@name="bookForm"]//input[@id="{}"]"#, field_id))?;
            self.browser.send_keys(&field, value)?;
        }
        for (select_id, value) in &form.selects {
            self.select_by_value(
                &format!(r#"//form[@name="bookForm"]//select[@id="{}"]"#, select_id),
                value,
            )?;
        }
        for (textarea_id, value) in &form.textareas {
            let textarea = self.find_element(&format!(
                r#"//form[@name="bookForm"]//textarea[@id="{}"]"#,
                textarea_id
            ))?;
            self.browser.send_keys(&textarea, value)?;
        }

        let submit_button = self.find_element(
            r#"//form[@name="bookForm"]//input[@name="commit" and @type="submit"]"#,
        )?;
        self.browser.click(&submit_button)?;
        info!("uploaded issue {}: {}", page.number, page.title);
        Ok(())
    }

    fn select_by_value(&mut self, select_xpath: &str, value: &str) -> Result<(), UploadError> {
        self.find_element(select_xpath)?;
        let option = self.find_element(&format!(r#"{}/option[@value="{}"]"#, select_xpath, value))?;
        self.browser.click(&option)
    }

    fn find_element(&mut self, xpath: &str) -> Result<B::Element, UploadError> {
        self.browser
            .find_all(xpath)?
            .into_iter()
            .next()
            .ok_or_else(|| UploadError::ControlNotFound {
                xpath: xpath.to_string(),
            })
    }

    pub fn into_browser(self) -> B {
        self.browser
    }
}

impl<B: Browser> Publisher for Uploader<B> {
    fn publish(&mut self, page: &NovelRecord) -> Result<(), UploadError> {
        self.upload_page(page)
    }
}
