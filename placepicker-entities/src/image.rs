/// Reference to an image of a place together with its alternative text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    pub src: String,
    pub alt: String,
}
