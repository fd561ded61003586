//! Walks the content tree and places every group, section and entry.

use log::debug;

use super::{LayoutContext, PagedOutput};
use crate::error::RenderError;
use crate::fonts::TextMeasure;
use crate::model::{Entry, Group, Section};
use crate::style::{BlockRole, LayoutConfig};

/// Lays out `groups` in order and returns the unnumbered pages.
///
/// Groups, sections and entries without any non-blank text are skipped
/// along with their spacing.  Groups after the first placed one are preceded
/// by a rule and extra spacing.  Each
/// entry renders concept, description, optional note and code block in that
/// order.  Headings carry a keep-with-next reservation, checked through
/// [`LayoutContext::ensure_space`] like every other block, so a heading is
/// not left alone at the bottom of a page.
pub fn render_document(
    groups: &[Group],
    config: &LayoutConfig,
    measure: &dyn TextMeasure,
) -> Result<PagedOutput, RenderError> {
    let mut ctx = LayoutContext::new(config, measure)?;

    let mut placed_any = false;
    for group in groups {
        if !group.has_content() {
            ctx.record_group_page(false);
            continue;
        }
        if placed_any {
            place_separator(&mut ctx);
        }
        place_group(&mut ctx, group);
        placed_any = true;
    }

    Ok(ctx.finish())
}

fn place_separator(ctx: &mut LayoutContext<'_>) {
    let config = ctx.config();
    let reserve = config.typography.h1 * 2.0;
    let gap = config.spacing * 3.0;
    let rule_offset = config.spacing * 1.5;
    let color = config.palette.separator;

    ctx.ensure_space(reserve);
    ctx.advance(gap);
    let y = ctx.cursor() - rule_offset;
    ctx.draw_rule(y, color);
}

fn place_group(ctx: &mut LayoutContext<'_>, group: &Group) {
    debug!(
        "Placing group '{}' with {} section(s) on page {}",
        group.title(),
        group.sections().len(),
        ctx.page_count()
    );

    let title_style = ctx.config().block_style(BlockRole::GroupTitle);
    let intro_style = ctx.config().block_style(BlockRole::GroupIntro);

    ctx.place_text_block(group.title(), &title_style);
    ctx.record_group_page(!group.title().trim().is_empty());
    ctx.place_text_block(group.intro(), &intro_style);

    for section in group.sections().iter().filter(|s| s.has_content()) {
        place_section(ctx, section);
    }

    let trailing = ctx.config().spacing;
    ctx.advance(trailing);
}

fn place_section(ctx: &mut LayoutContext<'_>, section: &Section) {
    let config = ctx.config();
    let reserve = config.typography.h2 + config.spacing;
    let gap = config.spacing * 1.2;
    let trailing = config.spacing * 0.5;
    let title_style = config.block_style(BlockRole::SectionTitle);

    ctx.ensure_space(reserve);
    ctx.advance(gap);
    ctx.place_text_block(section.title(), &title_style);

    for entry in section.items().iter().filter(|e| e.has_content()) {
        place_entry(ctx, entry);
    }

    ctx.advance(trailing);
}

fn place_entry(ctx: &mut LayoutContext<'_>, entry: &Entry) {
    let config = ctx.config();
    let reserve = config.typography.h3 + config.spacing * 0.5;
    let gap = config.spacing * 0.8;
    let trailing = config.spacing * 1.2;
    let concept_style = config.block_style(BlockRole::Concept);
    let description_style = config.block_style(BlockRole::Description);
    let note_style = config.block_style(BlockRole::Note);

    ctx.ensure_space(reserve);
    ctx.advance(gap);
    ctx.place_text_block(entry.concept(), &concept_style);
    ctx.place_text_block(entry.description(), &description_style);
    if let Some(note) = entry.note() {
        ctx.place_text_block(note, &note_style);
    }
    ctx.place_code_block(entry.code());
    ctx.advance(trailing);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::BuiltinMetrics;
    use crate::layout::DrawOp;
    use crate::style::FontFace;

    fn javascript_group() -> Group {
        Group::new("JavaScript").with_intro("Basics").with_section(
            Section::new("Variables")
                .with_item(
                    Entry::new("let")
                        .with_description("block-scoped")
                        .with_code("let x = 1;"),
                )
                .with_item(
                    Entry::new("const")
                        .with_description("block-scoped, immutable binding")
                        .with_note(Some("cannot reassign".to_string()))
                        .with_code("const x = 1;"),
                ),
        )
    }

    fn roles(output: &PagedOutput) -> Vec<BlockRole> {
        output
            .pages()
            .iter()
            .flat_map(|page| page.blocks())
            .map(|block| block.role)
            .collect()
    }

    #[test]
    fn javascript_basics_fit_on_one_page_in_order() {
        let config = LayoutConfig::default();
        let output =
            render_document(&[javascript_group()], &config, &BuiltinMetrics).expect("layout");

        assert_eq!(output.page_count(), 1);
        assert_eq!(
            roles(&output),
            vec![
                BlockRole::GroupTitle,
                BlockRole::GroupIntro,
                BlockRole::SectionTitle,
                BlockRole::Concept,
                BlockRole::Description,
                BlockRole::Code,
                BlockRole::Concept,
                BlockRole::Description,
                BlockRole::Note,
                BlockRole::Code,
            ]
        );

        let page = &output.pages()[0];
        let texts: Vec<_> = page
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, style, .. } => Some((text.as_str(), style.face)),
                _ => None,
            })
            .collect();
        let note = texts
            .iter()
            .position(|(text, _)| *text == "cannot reassign")
            .expect("note drawn");
        assert_eq!(texts[note].1, FontFace::Italic);
        assert_eq!(texts[note - 1].0, "block-scoped, immutable binding");
        assert_eq!(texts[note + 1], ("const x = 1;", FontFace::Mono));

        let blocks = page.blocks();
        assert!(blocks.windows(2).all(|pair| pair[0].bottom() <= pair[1].top));
    }

    #[test]
    fn all_empty_text_produces_a_single_page_without_blocks() {
        let empty_section = Section::new("").with_items(vec![Entry::new(""), Entry::new("  ")]);
        let groups = vec![
            Group::new("").with_section(empty_section.clone()),
            Group::new(" ").with_sections(vec![empty_section.clone(), empty_section]),
        ];
        let config = LayoutConfig::default();
        let output = render_document(&groups, &config, &BuiltinMetrics).expect("layout");

        assert_eq!(output.page_count(), 1);
        let page = &output.pages()[0];
        assert!(page.blocks().is_empty());
        assert!(page.ops().is_empty());
        let expected: &[Option<usize>] = &[None, None];
        assert_eq!(output.group_pages(), expected);
    }

    #[test]
    fn many_empty_groups_and_entries_stay_on_one_page() {
        let empty_section = Section::new("").with_items(vec![Entry::new(""); 5]);
        let groups = vec![Group::new("").with_section(empty_section); 60];
        let config = LayoutConfig::default();
        let output = render_document(&groups, &config, &BuiltinMetrics).expect("layout");

        assert_eq!(output.page_count(), 1);
        assert!(output.pages()[0].ops().is_empty());
        assert_eq!(output.group_pages().len(), 60);
        assert!(output.group_pages().iter().all(Option::is_none));
    }

    #[test]
    fn empty_entries_add_no_space_between_titles() {
        let config = LayoutConfig::default();
        let padded = Group::new("G")
            .with_section(Section::new("S").with_items(vec![Entry::new(" "); 100]));
        let bare = Group::new("G").with_section(Section::new("S"));

        let a = render_document(&[padded], &config, &BuiltinMetrics).expect("layout");
        let b = render_document(&[bare], &config, &BuiltinMetrics).expect("layout");
        assert_eq!(a.page_count(), 1);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_groups_between_content_add_a_single_separator() {
        let config = LayoutConfig::default();
        let groups = vec![
            Group::new("First"),
            Group::new(""),
            Group::new("  ").with_intro(" "),
            Group::new("Second"),
        ];
        let output = render_document(&groups, &config, &BuiltinMetrics).expect("layout");

        let rules = output.pages()[0]
            .ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::Rule { .. }))
            .count();
        assert_eq!(rules, 1);
        let expected: &[Option<usize>] = &[Some(1), None, None, Some(1)];
        assert_eq!(output.group_pages(), expected);
    }

    #[test]
    fn missing_note_reserves_no_space() {
        let config = LayoutConfig::default();
        let with_empty_note = Group::new("G").with_section(
            Section::new("S").with_item(
                Entry::new("c")
                    .with_description("d")
                    .with_note(Some(String::new()))
                    .with_code("x"),
            ),
        );
        let without_note = Group::new("G").with_section(
            Section::new("S").with_item(Entry::new("c").with_description("d").with_code("x")),
        );

        let a = render_document(&[with_empty_note], &config, &BuiltinMetrics).expect("layout");
        let b = render_document(&[without_note], &config, &BuiltinMetrics).expect("layout");
        assert_eq!(a, b);
    }

    #[test]
    fn long_code_sample_moves_whole_to_the_next_page() {
        let config = LayoutConfig {
            page_height: 185.0,
            ..LayoutConfig::default()
        };
        let code_line = config.typography.line_height(config.typography.code);
        assert_eq!((config.usable_height() / code_line).floor(), 40.0);

        let code = (1..=500)
            .map(|n| format!("console.log({});", n))
            .collect::<Vec<_>>()
            .join("\n");
        let group = Group::new("Logging").with_section(
            Section::new("Console").with_item(
                Entry::new("console.log")
                    .with_description("prints its arguments")
                    .with_code(code),
            ),
        );

        let output = render_document(&[group], &config, &BuiltinMetrics).expect("layout");
        assert_eq!(output.page_count(), 2);

        let first: Vec<_> = output.pages()[0].blocks().iter().map(|b| b.role).collect();
        assert_eq!(
            first,
            vec![
                BlockRole::GroupTitle,
                BlockRole::SectionTitle,
                BlockRole::Concept,
                BlockRole::Description,
            ]
        );

        let second = output.pages()[1].blocks();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].role, BlockRole::Code);
        assert_eq!(second[0].lines.len(), 500);
        assert_eq!(second[0].top, config.margin);
    }

    #[test]
    fn later_groups_start_with_a_separator() {
        let config = LayoutConfig::default();
        let groups = vec![Group::new("First"), Group::new("Second")];
        let output = render_document(&groups, &config, &BuiltinMetrics).expect("layout");

        let page = &output.pages()[0];
        let rule_y = page
            .ops()
            .iter()
            .find_map(|op| match op {
                DrawOp::Rule { y, .. } => Some(*y),
                _ => None,
            })
            .expect("separator drawn");
        let blocks = page.blocks();
        assert_eq!(blocks.len(), 2);
        assert!(rule_y > blocks[0].bottom());
        assert!(rule_y < blocks[1].top);
        let expected: &[Option<usize>] = &[Some(1), Some(1)];
        assert_eq!(output.group_pages(), expected);
    }

    #[test]
    fn group_pages_follow_page_breaks() {
        let config = LayoutConfig::default();
        let filler = (0..60).map(|n| format!("line {}", n)).collect::<Vec<_>>().join("\n");
        let groups = vec![
            Group::new("First").with_section(
                Section::new("Filler").with_item(Entry::new("fill").with_code(filler)),
            ),
            Group::new("Second"),
        ];
        let output = render_document(&groups, &config, &BuiltinMetrics).expect("layout");
        assert_eq!(output.page_count(), 2);
        let expected: &[Option<usize>] = &[Some(1), Some(2)];
        assert_eq!(output.group_pages(), expected);
    }
}
