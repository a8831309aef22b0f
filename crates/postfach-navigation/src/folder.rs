//! Archive folders

use postfach_session::Page;
use url::Url;

use crate::markup::{anchors, FOLDER_LINK};
use crate::Result;

/// A folder on the archive index page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRef {
    /// Display name as shown by the portal
    pub name: String,
    /// Listing page of the folder
    pub url: Url,
}

/// Extract the folders listed on the archive index page, in document order.
///
/// The first folder anchor on the page always points back to the parent
/// folder and is dropped, whatever it says.
pub fn parse_folders(page: &Page) -> Result<Vec<FolderRef>> {
    let doc = page.html();
    let folders = anchors(&doc, FOLDER_LINK, &page.url)?
        .into_iter()
        .skip(1)
        .filter_map(|anchor| match anchor.href {
            Some(url) => Some(FolderRef {
                name: anchor.text,
                url,
            }),
            None => {
                tracing::debug!(folder = %anchor.text, "Skipping folder without link");
                None
            }
        })
        .collect();

    Ok(folders)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_page(html: &str) -> Page {
        let url = Url::parse("https://portal.test/banking/postfach/ordner").unwrap();
        Page::new(url, 200, html.as_bytes().to_vec())
    }

    #[test]
    fn test_first_folder_is_excluded() {
        let page = index_page(
            r#"<ul>
                 <li><a class="evt-gotoFolder" href="?folder=root">Postfach</a></li>
                 <li><a class="evt-gotoFolder" href="?folder=2019">2019</a></li>
                 <li><a class="evt-gotoFolder" href="?folder=2020">2020</a></li>
                 <li><a class="other" href="?folder=x">Not a folder</a></li>
               </ul>"#,
        );

        let folders = parse_folders(&page).unwrap();
        let names: Vec<&str> = folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["2019", "2020"]);
        assert_eq!(
            folders[1].url.as_str(),
            "https://portal.test/banking/postfach/ordner?folder=2020"
        );
    }

    #[test]
    fn test_first_excluded_even_if_it_looks_real() {
        let page = index_page(
            r#"<a class="evt-gotoFolder" href="?folder=2018">2018</a>
               <a class="evt-gotoFolder" href="?folder=2019">2019</a>"#,
        );

        let folders = parse_folders(&page).unwrap();
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].name, "2019");
    }

    #[test]
    fn test_empty_index() {
        assert!(parse_folders(&index_page("<p>Keine Ordner</p>")).unwrap().is_empty());
        assert!(parse_folders(&index_page(
            r#"<a class="evt-gotoFolder" href="?folder=root">Postfach</a>"#
        ))
        .unwrap()
        .is_empty());
    }
}
