//! Final clip reindexing.

use kklip_models::Clip;

/// Assign sequential 1-based indices in the list's current order.
///
/// Unmodified `Clip N` placeholder titles are renumbered to match the new
/// index; ranking- or human-authored titles are left untouched. Downstream
/// collaborators derive output filenames from the index, so this must run
/// after the final sort.
pub fn reindex_clips(clips: &mut [Clip]) {
    for (i, clip) in clips.iter_mut().enumerate() {
        let index = (i + 1) as u32;
        if clip.has_placeholder_title() {
            clip.title = Clip::placeholder_title(index);
        }
        clip.index = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kklip_models::Segment;

    fn clip(index: u32, title: &str) -> Clip {
        Clip {
            index,
            title: title.to_string(),
            hook: String::new(),
            segments: vec![Segment::new(0.0, 30.0, "")],
        }
    }

    #[test]
    fn test_indices_become_sequential() {
        let mut clips = vec![clip(7, "Clip 7"), clip(2, "Clip 2"), clip(9, "Clip 9")];
        reindex_clips(&mut clips);

        assert_eq!(clips[0].index, 1);
        assert_eq!(clips[1].index, 2);
        assert_eq!(clips[2].index, 3);
        assert_eq!(clips[0].title, "Clip 1");
        assert_eq!(clips[2].title, "Clip 3");
    }

    #[test]
    fn test_authored_titles_survive() {
        let mut clips = vec![clip(4, "The big reveal"), clip(1, "Clip 1")];
        reindex_clips(&mut clips);

        assert_eq!(clips[0].title, "The big reveal");
        assert_eq!(clips[0].index, 1);
        assert_eq!(clips[1].title, "Clip 2");
    }
}
