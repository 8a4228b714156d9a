//! Prompt construction for design analysis.

use super::provider::ChatRequest;
use crate::config::AnalysisConfig;
use crate::types::ImageRecord;

pub const SYSTEM_PROMPT: &str = "You are a senior UI/UX design consultant with 10+ years of \
experience in visual design analysis, design systems, and user interface best practices. You \
excel at identifying design patterns and providing actionable UI/UX recommendations.";

/// One line per image: `Image <n>: <title> (Source: <source>)`.
pub fn image_descriptions(images: &[ImageRecord]) -> String {
    images
        .iter()
        .enumerate()
        .map(|(i, image)| {
            let title = if image.title.trim().is_empty() {
                "Design inspiration"
            } else {
                image.title.as_str()
            };
            format!("Image {}: {} (Source: {})", i + 1, title, image.source)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn user_prompt(keywords: &str, images: &[ImageRecord]) -> String {
    format!(
        r#"I'm creating a UI/UX moodboard and need your expert analysis and design recommendations.

**Project Context:**
- Search Keywords: "{keywords}"
- Number of Images: {count}
- Image Sources: Mix of Pexels and Pinterest design inspiration

**Image Descriptions:**
{descriptions}

Based on these images and the "{keywords}" theme, please provide a comprehensive analysis following this structure:

## 🎨 Visual Theme Summary
Analyze what you can infer about the visual style from the keywords and image sources. What design characteristics would likely be present in images matching "{keywords}"? Consider:
- Color palettes (warm/cool, monochromatic/vibrant)
- Visual style (minimal, modern, retro, etc.)
- Layout patterns (grid-based, asymmetrical, etc.)
- Typography approach (clean, decorative, etc.)

## 💡 UI Design Recommendations
Based on this visual theme, provide 3-5 specific UI design best practices and actionable tips:

**Color & Visual Hierarchy:**
- Specific color implementation advice
- Contrast and accessibility considerations

**Layout & Spacing:**
- Grid system recommendations
- White space usage guidelines

**Component Design:**
- Button and interaction element styling
- Card and container design patterns

**Typography & Content:**
- Font selection and hierarchy tips
- Content organization best practices

## 🚀 Implementation Tips
Provide 2-3 immediate next steps a designer could take to implement this style in their UI project.

Keep all recommendations practical, specific, and actionable for modern UI/UX design projects."#,
        count = images.len(),
        descriptions = image_descriptions(images),
    )
}

/// Build the full chat request for a board.
pub fn design_request(keywords: &str, images: &[ImageRecord], config: &AnalysisConfig) -> ChatRequest {
    ChatRequest {
        system: SYSTEM_PROMPT.to_string(),
        prompt: user_prompt(keywords, images),
        max_tokens: config.max_tokens,
        temperature: config.temperature,
    }
}
