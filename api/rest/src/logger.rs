/// Remote address, request line, status, response size and elapsed seconds.
pub fn logger_format() -> &'static str {
    "%a \"%r\" %s %b %Ts"
}
