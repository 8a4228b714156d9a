//! Canned analyses used when no model answer is available.

/// Analysis returned when no provider is configured.
pub fn mock_analysis(keywords: &str) -> String {
    format!(
        r#"## 🎨 Visual Theme Summary

Based on your search for "{keywords}", we can anticipate a design direction that emphasizes modern UI principles and user-centered design.

## 💡 UI Design Recommendations

**Color & Visual Hierarchy:**
- Use a sophisticated neutral palette with strategic accent colors
- Maintain high contrast ratios for accessibility (4.5:1 minimum)
- Consider using color psychology to enhance user experience

**Layout & Spacing:**
- Implement consistent grid systems for visual harmony
- Use generous white space for better readability
- Create clear visual hierarchies with size and positioning

**Component Design:**
- Design interactive elements with clear feedback states
- Use subtle shadows and modern styling techniques
- Ensure components are reusable and scalable

**Typography & Content:**
- Choose readable, modern typefaces
- Establish consistent typography scales
- Balance text density with visual breathing room

## 🚀 Implementation Tips

1. **Create a design system** - Establish consistent patterns before building
2. **Focus on user needs** - Design with your target audience in mind
3. **Test and iterate** - Validate designs with real users when possible

---
*📝 Configure an LLM provider in the [llm] section of your config for AI-powered design analysis based on your actual moodboard images.*"#
    )
}

/// Analysis returned when the provider call fails; embeds the reason.
pub fn fallback_analysis(keywords: &str, error: &str) -> String {
    format!(
        r#"## 🎨 Visual Theme Summary

Based on your search for "{keywords}", this moodboard likely features modern design elements with thoughtful attention to user experience and visual hierarchy.

## 💡 UI Design Recommendations

**Color & Visual Hierarchy:**
- Use a neutral base palette (whites, light grays) with strategic accent colors
- Maintain contrast ratios of at least 4.5:1 for accessibility
- Limit your color palette to 3-5 colors maximum for cohesion

**Layout & Spacing:**
- Implement an 8px or 4px grid system for consistent spacing
- Use generous white space to create breathing room
- Follow the rule of thirds for visual balance

**Component Design:**
- Design buttons with clear hover and active states
- Use subtle shadows and rounded corners for modern appeal
- Create consistent card layouts with proper padding

**Typography & Content:**
- Establish a clear hierarchy with 3-4 font sizes maximum
- Use readable fonts like Inter, Roboto, or system fonts
- Maintain consistent line spacing (1.4-1.6x font size)

## 🚀 Implementation Tips

1. **Start with a design system** - Define your colors, typography, and spacing before designing components
2. **Focus on consistency** - Use the same patterns across all UI elements
3. **Test on multiple devices** - Ensure your design works on mobile, tablet, and desktop

---
*⚠️ AI analysis temporarily unavailable ({error}). These are general best practices based on your keywords.*"#
    )
}
