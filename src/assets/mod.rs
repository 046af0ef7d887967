pub(crate) mod image_ref;
