//! Group bookmarks embedded with `lopdf`.

use lopdf::{dictionary, Document, Object, ObjectId};
use thiserror::Error;

use crate::model::Group;

/// Errors that can occur while embedding bookmarks into a rendered PDF document.
#[derive(Error, Debug)]
pub enum BookmarkError {
    /// The PDF bytes could not be parsed or written by `lopdf`.
    #[error("Failed to process PDF bytes: {0}")]
    Parse(#[from] lopdf::Error),
    /// Writing the updated document failed.
    #[error("Failed to write PDF bytes: {0}")]
    Io(#[from] std::io::Error),
    /// The trailer has no usable catalog entry.
    #[error("PDF catalog entry is missing")]
    MissingCatalog,
    /// The catalog object is not a dictionary.
    #[error("PDF catalog entry is not a dictionary")]
    InvalidCatalog,
    /// A group points at a page the document does not have.
    #[error("Group {group_index} refers to missing page {page_number} for its bookmark")]
    MissingPage {
        /// Index of the group whose page is missing.
        group_index: usize,
        /// The requested (1-based) page number.
        page_number: usize,
    },
}

/// Adds a flat outline with one entry per group, targeting the page its title
/// was placed on.  Groups without a page (untitled groups) are left out.
pub fn apply_group_bookmarks(
    pdf_bytes: &[u8],
    groups: &[Group],
    group_pages: &[Option<usize>],
) -> Result<Vec<u8>, BookmarkError> {
    let mut document = Document::load_mem(pdf_bytes)?;
    let targets = resolve_targets(&document, groups, group_pages)?;
    if targets.is_empty() {
        return Ok(pdf_bytes.to_vec());
    }

    let outlines_id = document.new_object_id();
    let ids: Vec<ObjectId> = targets.iter().map(|_| document.new_object_id()).collect();

    for (index, (title, page_ref)) in targets.iter().enumerate() {
        let mut item = dictionary! {
            "Title" => Object::string_literal(title.as_str()),
            "Parent" => outlines_id,
            "Dest" => vec![Object::Reference(*page_ref), "Fit".into()],
        };
        if let Some(prev) = index.checked_sub(1).map(|i| ids[i]) {
            item.set("Prev", prev);
        }
        if let Some(&next) = ids.get(index + 1) {
            item.set("Next", next);
        }
        document.objects.insert(ids[index], Object::Dictionary(item));
    }

    let outlines = dictionary! {
        "Type" => "Outlines",
        "Count" => ids.len() as i64,
        "First" => ids[0],
        "Last" => ids[ids.len() - 1],
    };
    document.objects.insert(outlines_id, Object::Dictionary(outlines));
    attach_to_catalog(&mut document, outlines_id)?;

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

/// Pairs every titled group with the object id of its page.
fn resolve_targets(
    document: &Document,
    groups: &[Group],
    group_pages: &[Option<usize>],
) -> Result<Vec<(String, ObjectId)>, BookmarkError> {
    let pages = document.get_pages();

    groups
        .iter()
        .zip(group_pages)
        .enumerate()
        .filter_map(|(index, (group, page))| page.map(|number| (index, group, number)))
        .map(|(group_index, group, page_number)| {
            u32::try_from(page_number)
                .ok()
                .and_then(|number| pages.get(&number))
                .map(|page_ref| (group.title().trim().to_string(), *page_ref))
                .ok_or(BookmarkError::MissingPage {
                    group_index,
                    page_number,
                })
        })
        .collect()
}

fn attach_to_catalog(document: &mut Document, outlines_id: ObjectId) -> Result<(), BookmarkError> {
    let catalog_id = document
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| BookmarkError::MissingCatalog)?;

    let catalog = document
        .objects
        .get_mut(&catalog_id)
        .ok_or(BookmarkError::MissingCatalog)?
        .as_dict_mut()
        .map_err(|_| BookmarkError::InvalidCatalog)?;
    catalog.set("Outlines", outlines_id);
    catalog.set("PageMode", "UseOutlines");

    Ok(())
}
