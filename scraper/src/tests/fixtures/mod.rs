use std::fs;
use std::path::Path;

/// Load test HTML fixture by name
pub fn load_html_fixture(fixture_name: &str) -> String {
    let path = Path::new("src/tests/fixtures").join(format!("{}.html", fixture_name));
    fs::read_to_string(path)
        .unwrap_or_else(|_| panic!("Failed to load test fixture: {}", fixture_name))
}

/// Load a real failure case for regression testing
pub fn load_failure_html(failure_name: &str) -> Option<String> {
    let path = Path::new("src/tests/fixtures/failures").join(format!("{}.html", failure_name));
    fs::read_to_string(path).ok()
}

/// A minimal issue page with the given overview rows and trailing body markup.
pub fn issue_page(title: &str, overview_rows: &str, body: &str) -> String {
    format!(
        r#"<html><body>
        <div id="content">
          <h1><span>{}</span></h1>
          <div id="bodyContent">
            <div class="perrypedia_std_rframe overview"><table>{}</table></div>
            {}
          </div>
        </div>
        </body></html>"#,
        title, overview_rows, body
    )
}
