use crate::chapter::Chapter;
use crate::picture::Picture;
use crate::probe::FileType;
use crate::properties::FileProperties;
use crate::Result;

use std::borrow::Cow;
use std::path::Path;

// This defines the `Accessor` trait, used to define unified getters/setters for the
// metadata fields every handler shares.
//
// Usage:
//
// accessor_trait! {
//     [field_name]<type>
// }
//
// * `field_name` is the name of the method to access the field. If a name consists of multiple segments,
// such as `track_total`, they should be separated by spaces like so: [track total]<type>.
//
// * `type` is the return type for `Accessor::field_name`. By default, this type will also be used
// in the setter.
//
// An owned type can also be specified for the setter:
//
// accessor_trait! {
//     field_name<type, owned_type>
// }
macro_rules! accessor_trait {
	($([$($name:tt)+] < $($ty:ty),+ >),+ $(,)?) => {
		/// Provides accessors for the metadata fields every format shares
		///
		/// The default implementations return [`None`] and ignore writes, so a
		/// handler only overrides the fields its container can represent.
		pub trait Accessor {
			$(
				accessor_trait! { @GETTER [$($name)+] $($ty),+ }

				accessor_trait! { @SETTER [$($name)+] $($ty),+ }

				accessor_trait! { @REMOVE [$($name)+] $($ty),+ }
			)+
		}
	};
	(@GETTER [$($name:tt)+] $ty:ty $(, $_ty:tt)?) => {
		accessor_trait! { @GET_METHOD [$($name)+] Option<$ty> }
	};
	(@SETTER [$($name:tt)+] $_ty:ty, $owned_ty:tt) => {
		accessor_trait! { @SET_METHOD [$($name)+] $owned_ty }
	};
	(@SETTER [$($name:tt)+] $ty:ty) => {
		accessor_trait! { @SET_METHOD [$($name)+] $ty }
	};
	(@REMOVE [$($name:tt)+] $($_ty:ty),+) => {
		accessor_trait! { @REMOVE_METHOD [$($name)+] }
	};
	(@GET_METHOD [$name:tt $($other:tt)*] Option<$ret_ty:ty>) => {
		paste::paste! {
			#[doc = "Returns the " $name $(" " $other)*]
			fn [<
				$name $(_ $other)*
			>] (&self) -> Option<$ret_ty> { None }
		}
	};
	(@SET_METHOD [$name:tt $($other:tt)*] $owned_ty:ty) => {
		paste::paste! {
			#[doc = "Sets the " $name $(" " $other)*]
			fn [<
				set_ $name $(_ $other)*
			>] (&mut self, _value: $owned_ty) {}
		}
	};
	(@REMOVE_METHOD [$name:tt $($other:tt)*]) => {
		paste::paste! {
			#[doc = "Removes the " $name $(" " $other)*]
			fn [<
				remove_ $name $(_ $other)*
			>] (&mut self) {}
		}
	};
}

accessor_trait! {
	[title       ]<Cow<'_, str>, String>, [artist      ]<Cow<'_, str>, String>,
	[album       ]<Cow<'_, str>, String>, [album artist]<Cow<'_, str>, String>,
	[genre       ]<Cow<'_, str>, String>, [comment     ]<Cow<'_, str>, String>,
	[copyright   ]<Cow<'_, str>, String>, [encoder     ]<Cow<'_, str>, String>,
	[lyrics      ]<Cow<'_, str>, String>, [composer    ]<Cow<'_, str>, String>,
	[year        ]<u32>,                  [track       ]<u32>,
	[track total ]<u32>,                  [disc        ]<u32>,
	[disc total  ]<u32>,
}

/// A metadata record bound to one on-disk audio resource
///
/// Records are obtained through [`Probe::open`](crate::Probe::open) or
/// [`read_from_path`](crate::read_from_path). A record exclusively owns its
/// backing tag object; setters are write-through to that in-memory object,
/// and nothing touches the resource until [`MetaData::update_file`].
pub trait MetaData: Accessor {
	/// The container format of the matched handler
	fn file_type(&self) -> FileType;

	/// The path this record was opened from
	fn path(&self) -> &Path;

	/// The derived audio properties
	///
	/// Zeroed out when property reading was disabled through
	/// [`ParseOptions`](crate::ParseOptions) or the stream was undecodable.
	fn properties(&self) -> &FileProperties;

	/// The front cover artwork, if any
	fn artwork(&self) -> Option<&Picture>;

	/// Replace the front cover artwork
	///
	/// # Errors
	///
	/// The container cannot carry the picture's encoding
	/// ([`Error::UnsupportedMimeType`](crate::Error::UnsupportedMimeType));
	/// MP4 artwork is limited to PNG, JPEG and BMP, while ID3 takes any
	/// recognized image. A failed set leaves the record untouched.
	fn set_artwork(&mut self, picture: Picture) -> Result<()>;

	/// Remove all embedded artwork
	fn remove_artwork(&mut self);

	/// The chapter markers stored in the metadata
	fn chapters(&self) -> &[Chapter];

	/// Whether the file's content is DRM-protected
	fn is_drm_protected(&self) -> bool {
		false
	}

	/// Whether the protected content is authorized for playback
	///
	/// This layer has no access to a rights context, so protected content is
	/// always reported unauthorized.
	fn is_drm_authorized(&self) -> bool {
		!self.is_drm_protected()
	}

	/// Whether [`MetaData::update_file`] can succeed
	///
	/// `false` when the resource is DRM-protected or not writable.
	fn can_update_file(&self) -> bool;

	/// Commit the in-memory metadata to the underlying resource
	///
	/// # Errors
	///
	/// * The record is not updatable ([`Error::UpdateNotPermitted`](crate::Error::UpdateNotPermitted));
	///   the resource is untouched in this case
	/// * The backing library fails to rewrite the file
	fn update_file(&mut self) -> Result<()>;

	/// Take the values from another record and apply them to this one
	///
	/// Every writable field is copied, including artwork; absent fields are
	/// removed. Derived state (properties, chapters, DRM flags) stays put.
	///
	/// # Errors
	///
	/// The other record's artwork cannot be carried by this record's
	/// container (see [`MetaData::set_artwork`]); text and number fields
	/// are already copied at that point.
	fn synchronize_from(&mut self, other: &dyn MetaData) -> Result<()> {
		macro_rules! copy_text {
			($($field:ident),+ $(,)?) => {
				paste::paste! {
					$(
						match other.$field() {
							Some(value) => self.[<set_ $field>](value.into_owned()),
							None => self.[<remove_ $field>](),
						}
					)+
				}
			};
		}
		macro_rules! copy_number {
			($($field:ident),+ $(,)?) => {
				paste::paste! {
					$(
						match other.$field() {
							Some(value) => self.[<set_ $field>](value),
							None => self.[<remove_ $field>](),
						}
					)+
				}
			};
		}

		copy_text! {
			title, artist, album, album_artist, genre, comment,
			copyright, encoder, lyrics, composer,
		}
		copy_number! {
			year, track, track_total, disc, disc_total,
		}

		match other.artwork() {
			Some(picture) => self.set_artwork(picture.clone())?,
			None => self.remove_artwork(),
		}

		Ok(())
	}
}
