// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parser combinators over a token stream.
//!
//! A parser takes a [`TokenView`] and either hands back the advanced view
//! with its output, or a [`ParseFailure`]. Views are `Copy`, so a failed
//! attempt never disturbs the caller's view: backtracking is retrying from
//! the view you already hold.

use tarn_ast::node::Missing;
use tarn_ast::token::{Token, TokenKind};
use tarn_ast::{Node, ParseFailure, Span};

/// A read-only cursor over a token slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenView<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> TokenView<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Index of the next token in the underlying slice.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn advance(self) -> Self {
        Self { tokens: self.tokens, pos: self.pos + 1 }
    }

    /// A failure to parse `construct` at the current position.
    pub fn failure(&self, construct: &'static str) -> ParseFailure {
        let found = self
            .peek()
            .or_else(|| self.tokens.last())
            .cloned()
            .unwrap_or_else(|| Token::new(TokenKind::Eof, "", Span::point(1, 1)));
        ParseFailure::new(construct, found, self.pos)
    }

    /// Span of the tokens between this view and a later one.
    ///
    /// When nothing was consumed the result is an empty span at the start
    /// of the next token.
    pub fn span_to(&self, later: TokenView<'t>) -> Span {
        if later.pos > self.pos {
            if let (Some(first), Some(last)) = (self.tokens.get(self.pos), self.tokens.get(later.pos - 1)) {
                return first.span.to(last.span);
            }
        }
        match self.peek().or_else(|| self.tokens.last()) {
            Some(token) => Span::point(token.span.start_line, token.span.start_col),
            None => Span::point(1, 1),
        }
    }
}

/// A successful parse: the residual view and the produced value.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<'t, T> {
    pub rest: TokenView<'t>,
    pub value: T,
}

pub type ParseResult<'t, T> = Result<Parsed<'t, T>, ParseFailure>;

/// Anything that parses a token view.
///
/// Implemented for closures and `fn` items of the matching shape, so
/// grammar rules are plain functions.
pub trait Parser<'t> {
    type Output;

    fn parse(&self, input: TokenView<'t>) -> ParseResult<'t, Self::Output>;

    /// Transform the output of a successful parse.
    fn map<F, U>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> U,
    {
        Map { parser: self, f }
    }

    /// See [`named`].
    fn named(self, construct: &'static str) -> Named<Self>
    where
        Self: Sized,
    {
        Named { parser: self, construct }
    }
}

impl<'t, O, F> Parser<'t> for F
where
    F: Fn(TokenView<'t>) -> ParseResult<'t, O>,
{
    type Output = O;

    fn parse(&self, input: TokenView<'t>) -> ParseResult<'t, O> {
        self(input)
    }
}

pub struct Map<P, F> {
    parser: P,
    f: F,
}

impl<'t, P, F, U> Parser<'t> for Map<P, F>
where
    P: Parser<'t>,
    F: Fn(P::Output) -> U,
{
    type Output = U;

    fn parse(&self, input: TokenView<'t>) -> ParseResult<'t, U> {
        let Parsed { rest, value } = self.parser.parse(input)?;
        Ok(Parsed { rest, value: (self.f)(value) })
    }
}

pub struct Named<P> {
    parser: P,
    construct: &'static str,
}

impl<'t, P: Parser<'t>> Parser<'t> for Named<P> {
    type Output = P::Output;

    fn parse(&self, input: TokenView<'t>) -> ParseResult<'t, P::Output> {
        self.parser.parse(input).map_err(|mut failure| {
            if failure.offset == input.position() {
                failure.construct = self.construct;
            }
            failure
        })
    }
}

/// Borrowed parser, for reusing one parser in several places of a
/// composition.
pub struct ByRef<'p, P>(&'p P);

impl<'t, 'p, P: Parser<'t>> Parser<'t> for ByRef<'p, P> {
    type Output = P::Output;

    fn parse(&self, input: TokenView<'t>) -> ParseResult<'t, P::Output> {
        self.0.parse(input)
    }
}

pub fn by_ref<P>(parser: &P) -> ByRef<'_, P> {
    ByRef(parser)
}

// ============================================================================
// Primitives
// ============================================================================

/// Match one token of the given kind.
pub fn token<'t>(kind: TokenKind) -> impl Parser<'t, Output = &'t Token> {
    move |input: TokenView<'t>| match input.peek() {
        Some(token) if token.kind == kind => Ok(Parsed { rest: input.advance(), value: token }),
        _ => Err(input.failure(kind.display_name())),
    }
}

/// An ordered list of parsers applied one after another.
pub trait Sequence<'t> {
    type Output;

    fn run(&self, input: TokenView<'t>) -> ParseResult<'t, Self::Output>;
}

/// An ordered list of parsers tried from the same position.
pub trait Alternatives<'t> {
    type Output;

    fn choose(&self, input: TokenView<'t>) -> ParseResult<'t, Self::Output>;
}

macro_rules! sequence_impl {
    ($($p:ident $v:ident),+) => {
        impl<'t, $($p: Parser<'t>),+> Sequence<'t> for ($($p,)+) {
            type Output = ($(<$p as Parser<'t>>::Output,)+);

            fn run(&self, input: TokenView<'t>) -> ParseResult<'t, Self::Output> {
                let ($($v,)+) = self;
                let rest = input;
                $(
                    let Parsed { rest, value: $v } = $v.parse(rest)?;
                )+
                Ok(Parsed { rest, value: ($($v,)+) })
            }
        }
    };
}

macro_rules! alternatives_impl {
    ($first:ident $f:ident $(, $p:ident $v:ident)*) => {
        impl<'t, Out, $first, $($p),*> Alternatives<'t> for ($first, $($p,)*)
        where
            $first: Parser<'t, Output = Out>,
            $($p: Parser<'t, Output = Out>,)*
        {
            type Output = Out;

            fn choose(&self, input: TokenView<'t>) -> ParseResult<'t, Out> {
                let ($f, $($v,)*) = self;
                let slot = match $f.parse(input) {
                    Ok(parsed) => return Ok(parsed),
                    Err(failure) => failure,
                };
                $(
                    let slot = match $v.parse(input) {
                        Ok(parsed) => return Ok(parsed),
                        Err(failure) => slot.furthest(failure),
                    };
                )*
                Err(slot)
            }
        }
    };
}

macro_rules! tuple_impls {
    ($mac:ident) => {
        $mac!(A a);
        $mac!(A a, B b);
        $mac!(A a, B b, C c);
        $mac!(A a, B b, C c, D d);
        $mac!(A a, B b, C c, D d, E e);
        $mac!(A a, B b, C c, D d, E e, F f);
        $mac!(A a, B b, C c, D d, E e, F f, G g);
        $mac!(A a, B b, C c, D d, E e, F f, G g, H h);
        $mac!(A a, B b, C c, D d, E e, F f, G g, H h, I i);
        $mac!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j);
        $mac!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k);
        $mac!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k, L l);
    };
}

tuple_impls!(sequence_impl);
tuple_impls!(alternatives_impl);

impl<'t, P: Parser<'t>, const N: usize> Sequence<'t> for [P; N] {
    type Output = Vec<P::Output>;

    fn run(&self, input: TokenView<'t>) -> ParseResult<'t, Self::Output> {
        let mut rest = input;
        let mut values = Vec::with_capacity(N);
        for parser in self {
            let parsed = parser.parse(rest)?;
            rest = parsed.rest;
            values.push(parsed.value);
        }
        Ok(Parsed { rest, value: values })
    }
}

impl<'t, P: Parser<'t>, const N: usize> Alternatives<'t> for [P; N] {
    type Output = P::Output;

    fn choose(&self, input: TokenView<'t>) -> ParseResult<'t, P::Output> {
        let mut slot: Option<ParseFailure> = None;
        for parser in self {
            match parser.parse(input) {
                Ok(parsed) => return Ok(parsed),
                Err(failure) => {
                    slot = Some(match slot {
                        Some(previous) => previous.furthest(failure),
                        None => failure,
                    });
                }
            }
        }
        Err(slot.unwrap_or_else(|| input.failure("an alternative")))
    }
}

/// Sequential composition. The first failing sub-parser's failure is the
/// result.
pub fn all<'t, S: Sequence<'t>>(parsers: S) -> impl Parser<'t, Output = S::Output> {
    move |input: TokenView<'t>| parsers.run(input)
}

/// Ordered choice. Commits to the first success; otherwise reports the
/// furthest failure, ties going to the later alternative.
pub fn any<'t, A: Alternatives<'t>>(parsers: A) -> impl Parser<'t, Output = A::Output> {
    move |input: TokenView<'t>| parsers.choose(input)
}

/// Output types that have a value meaning "not present".
pub trait Absent {
    fn absent(failure: ParseFailure) -> Self;
}

impl Absent for Node {
    fn absent(failure: ParseFailure) -> Self {
        Node::Missing(Missing { failure })
    }
}

impl<T> Absent for Vec<T> {
    fn absent(_failure: ParseFailure) -> Self {
        Vec::new()
    }
}

impl<T> Absent for Option<T> {
    fn absent(_failure: ParseFailure) -> Self {
        None
    }
}

/// Succeeds with the absent value when `parser` fails without consuming
/// anything. A failure after consuming tokens propagates.
pub fn optional<'t, P>(parser: P) -> impl Parser<'t, Output = P::Output>
where
    P: Parser<'t>,
    P::Output: Absent,
{
    move |input: TokenView<'t>| match parser.parse(input) {
        Ok(parsed) => Ok(parsed),
        Err(failure) if failure.offset == input.position() => Ok(Parsed {
            rest: input,
            value: <P::Output as Absent>::absent(failure),
        }),
        Err(failure) => Err(failure),
    }
}

/// Zero or more repetitions. Stops at the first failure, which is
/// discarded; earlier repetitions are kept.
pub fn many<'t, P: Parser<'t>>(parser: P) -> impl Parser<'t, Output = Vec<P::Output>> {
    move |input: TokenView<'t>| {
        let mut rest = input;
        let mut values = Vec::new();
        while let Ok(parsed) = parser.parse(rest) {
            // A success that consumed nothing would repeat forever.
            if parsed.rest.position() == rest.position() {
                break;
            }
            rest = parsed.rest;
            values.push(parsed.value);
        }
        Ok(Parsed { rest, value: values })
    }
}

/// `item (separator item)*`, rejecting a trailing separator.
///
/// Each item is parsed once: a separator after it means another item must
/// follow, no separator ends the list.
pub fn separated<'t, S, P>(separator: S, item: P) -> impl Parser<'t, Output = Vec<P::Output>>
where
    S: Parser<'t>,
    P: Parser<'t>,
{
    move |input: TokenView<'t>| {
        let mut values = Vec::new();
        let mut rest = input;
        loop {
            let parsed = item.parse(rest)?;
            values.push(parsed.value);
            match separator.parse(parsed.rest) {
                Ok(sep) => rest = sep.rest,
                Err(_) => return Ok(Parsed { rest: parsed.rest, value: values }),
            }
        }
    }
}

/// `open inner close`, keeping the delimiters.
pub fn surrounded<'t, O, C, I>(
    open: O,
    close: C,
    inner: I,
) -> impl Parser<'t, Output = (O::Output, I::Output, C::Output)>
where
    O: Parser<'t>,
    C: Parser<'t>,
    I: Parser<'t>,
{
    move |input: TokenView<'t>| all((by_ref(&open), by_ref(&inner), by_ref(&close))).parse(input)
}

/// Pair the output with the span of the tokens consumed.
pub fn spanned<'t, P: Parser<'t>>(parser: P) -> impl Parser<'t, Output = (P::Output, Span)> {
    move |input: TokenView<'t>| {
        let Parsed { rest, value } = parser.parse(input)?;
        Ok(Parsed { rest, value: (value, input.span_to(rest)) })
    }
}

/// Relabel a failure that happened at the parser's start position.
/// Failures deeper inside keep their own construct.
pub fn named<'t, P: Parser<'t>>(parser: P, construct: &'static str) -> Named<P> {
    parser.named(construct)
}

/// `item* terminator`, parsing every item once.
///
/// Repetition stops at the first item that fails; the terminator must
/// follow. If it does not, whichever of the two failures got further is
/// reported, so the error names what actually stopped the list. Ties
/// report the terminator.
pub fn many_until<'t, P, T>(item: P, terminator: T) -> impl Parser<'t, Output = (Vec<P::Output>, T::Output)>
where
    P: Parser<'t>,
    T: Parser<'t>,
{
    move |input: TokenView<'t>| {
        let mut rest = input;
        let mut values = Vec::new();
        let stopped = loop {
            match item.parse(rest) {
                Ok(parsed) if parsed.rest.position() > rest.position() => {
                    rest = parsed.rest;
                    values.push(parsed.value);
                }
                Ok(_) => break None,
                Err(failure) => break Some(failure),
            }
        };
        match terminator.parse(rest) {
            Ok(end) => Ok(Parsed { rest: end.rest, value: (values, end.value) }),
            Err(expected) => Err(match stopped {
                Some(failure) => failure.furthest(expected),
                None => expected,
            }),
        }
    }
}
