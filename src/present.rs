//! Rendering entries back into zonefile text.
//!
//! Modelled roughly after `std::fmt::Display`

use core::fmt;

//------------ ZoneFileFormatter ---------------------------------------------

/// The target entries are rendered into.
pub struct ZoneFileFormatter<'a> {
    buf: &'a mut (dyn fmt::Write + 'a),
}

impl ZoneFileFormatter<'_> {
    pub fn format<P: ZoneFileFormat + ?Sized>(
        &mut self,
        item: &P,
    ) -> fmt::Result {
        item.present(self)
    }

    pub fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.write_str(s)
    }

    pub fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        self.buf.write_fmt(args)
    }

    pub fn write_char(&mut self, c: char) -> fmt::Result {
        self.buf.write_char(c)
    }
}

impl fmt::Write for ZoneFileFormatter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.write_str(s)
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.buf.write_char(c)
    }

    fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> fmt::Result {
        self.buf.write_fmt(args)
    }
}

//------------ Display -------------------------------------------------------

/// Prints its field in zonefile format when [`Display`](fmt::Display)ed
///
/// This type is typically constructed by calling
/// [`ZoneFileFormat::display_zone_file`].
///
/// ```
/// use zonefile_lines::{Origin, ZoneFileFormat};
///
/// let origin = Origin::new("example.com.", " ; apex");
/// assert_eq!(
///     format!("{}", origin.display_zone_file()),
///     "$ORIGIN example.com. ; apex\n"
/// );
/// ```
pub struct Display<'a, T: ?Sized>(&'a T);

impl<'a, T: ZoneFileFormat + ?Sized> fmt::Display for Display<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_presentation(f)
    }
}

//------------ ZoneFileFormat ------------------------------------------------

/// Print as presentation (i.e. zonefile) format
///
/// This trait resembles the standard [`std::fmt::Display`] trait. Every
/// entry renders as one or more complete lines, each terminated by a line
/// feed, so that the rendering of a sequence of entries is the
/// concatenation of the rendering of each entry.
pub trait ZoneFileFormat {
    /// Write `self` to the `ZoneFileFormatter`
    fn present(&self, w: &mut ZoneFileFormatter) -> fmt::Result;

    fn write_presentation<W: fmt::Write>(&self, mut w: W) -> fmt::Result {
        let mut formatter = ZoneFileFormatter { buf: &mut w };
        self.present(&mut formatter)
    }

    fn to_presentation_string(&self) -> String {
        let mut s = String::new();
        // Writing into a string never fails.
        let _ = self.write_presentation(&mut s);
        s
    }

    /// Wrap the value so that it will be displayed in zone file format
    fn display_zone_file(&self) -> Display<'_, Self> {
        Display(self)
    }
}

impl<T: ZoneFileFormat> ZoneFileFormat for [T] {
    fn present(&self, w: &mut ZoneFileFormatter) -> fmt::Result {
        self.iter().try_for_each(|item| w.format(item))
    }
}
