use std::collections::HashSet;

use chrono::NaiveDate;

use super::novel;
use crate::error::UploadError;
use crate::upload::{BookForm, Browser, Uploader, LOGIN_URL, UPLOAD_URL};

/// Pretends every xpath matches one element, identified by the xpath itself.
#[derive(Default)]
struct FakeBrowser {
    missing: HashSet<String>,
    visited: Vec<String>,
    typed: Vec<(String, String)>,
    clicked: Vec<String>,
}

impl Browser for FakeBrowser {
    type Element = String;

    fn goto(&mut self, url: &str) -> Result<(), UploadError> {
        self.visited.push(url.to_string());
        Ok(())
    }

    fn title(&mut self) -> Result<String, UploadError> {
        Ok("Goodreads".to_string())
    }

    fn find_all(&mut self, xpath: &str) -> Result<Vec<String>, UploadError> {
        if self.missing.iter().any(|missing| xpath.contains(missing.as_str())) {
            Ok(Vec::new())
        } else {
            Ok(vec![xpath.to_string()])
        }
    }

    fn send_keys(&mut self, element: &String, text: &str) -> Result<(), UploadError> {
        self.typed.push((element.clone(), text.to_string()));
        Ok(())
    }

    fn click(&mut self, element: &String) -> Result<(), UploadError> {
        self.clicked.push(element.clone());
        Ok(())
    }
}

#[test]
fn test_book_form_for_complete_record() {
    let mut page = novel(1, Some("K. H. Scheer"));
    page.title = "Unternehmen Stardust".to_string();
    page.synopsis = Some("Rhodan fliegt zum Mond.".to_string());

    let form = BookForm::for_page(&page);

    assert_eq!(
        form.inputs,
        vec![
            ("book_title", "Unternehmen Stardust".to_string()),
            ("book_sort_by_title", "Unternehmen Stardust".to_string()),
            ("author_name", "K. H. Scheer".to_string()),
            ("book_publisher", "Pabel-Moewig Verlag KG, Rastatt".to_string()),
            ("book_publication_year", "1961".to_string()),
        ]
    );
    assert_eq!(
        form.selects,
        vec![
            ("book_publication_month", "9".to_string()),
            ("book_publication_day", "8".to_string()),
            ("book_format", "ebook".to_string()),
            ("book_language_code", "ger".to_string()),
        ]
    );
    assert_eq!(
        form.textareas,
        vec![("book_description_defaulted", "Rhodan fliegt zum Mond.".to_string())]
    );
}

#[test]
fn test_book_form_leaves_out_absent_values() {
    let mut page = novel(2, None);
    page.publish_date = None;

    let form = BookForm::for_page(&page);

    let inputs: Vec<&str> = form.inputs.iter().map(|(id, _)| *id).collect();
    assert_eq!(inputs, vec!["book_title", "book_sort_by_title", "book_publisher"]);
    let selects: Vec<&str> = form.selects.iter().map(|(id, _)| *id).collect();
    assert_eq!(selects, vec!["book_format", "book_language_code"]);
    assert!(form.textareas.is_empty());
}

#[test]
fn test_login_fills_sign_in_form() {
    let mut uploader = Uploader::new(FakeBrowser::default());
    uploader.login("leser@example.com", "geheim").unwrap();

    let browser = uploader.into_browser();
    assert_eq!(browser.visited, vec![LOGIN_URL]);
    assert_eq!(browser.typed.len(), 2);
    assert!(browser.typed[0].0.contains("user_email"));
    assert_eq!(browser.typed[0].1, "leser@example.com");
    assert_eq!(browser.typed[1].1, "geheim");
    assert_eq!(browser.clicked.len(), 1);
}

#[test]
fn test_upload_fills_form_and_commits() {
    let mut page = novel(1, Some("K. H. Scheer"));
    page.publish_date = NaiveDate::from_ymd_opt(1961, 9, 8);
    let pages = vec![page];

    let mut uploader = Uploader::new(FakeBrowser::default());
    let uploaded = uploader.upload(&pages);
    assert_eq!(uploaded.len(), 1);

    let browser = uploader.into_browser();
    assert_eq!(browser.visited, vec![UPLOAD_URL]);
    assert!(browser
        .typed
        .iter()
        .any(|(xpath, text)| xpath.contains("author_name") && text == "K. H. Scheer"));
    assert!(browser
        .clicked
        .iter()
        .any(|xpath| xpath.ends_with(r#"select[@id="book_publication_month"]/option[@value="9"]"#)));
    assert!(browser
        .clicked
        .iter()
        .any(|xpath| xpath.ends_with(r#"select[@id="book_language_code"]/option[@value="ger"]"#)));
    assert!(browser
        .clicked
        .last()
        .unwrap()
        .contains(r#"@name="commit""#));
}

#[test]
fn test_missing_control_skips_page_and_continues() {
    let mut browser = FakeBrowser::default();
    browser.missing.insert("author_name".to_string());
    let pages = vec![novel(1, Some("K. H. Scheer")), novel(2, None)];

    let mut uploader = Uploader::new(browser);
    let uploaded = uploader.upload(&pages);

    let numbers: Vec<u32> = uploaded.iter().map(|page| page.number).collect();
    assert_eq!(numbers, vec![2]);
    assert_eq!(uploader.into_browser().visited.len(), 2);
}

#[test]
fn test_control_not_found_names_the_xpath() {
    let mut browser = FakeBrowser::default();
    browser.missing.insert("user_password".to_string());

    let mut uploader = Uploader::new(browser);
    let err = uploader.login("leser@example.com", "geheim").unwrap_err();

    assert!(matches!(err, UploadError::ControlNotFound { .. }));
    assert!(err.to_string().contains("user_password"));
}
